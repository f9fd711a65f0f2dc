//! Pipeline tests against a local fake control plane

mod fake;
mod test_client;
