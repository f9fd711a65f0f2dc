//! Control plane models
//!
//! Request and response shapes for the control plane GraphQL API.

pub mod models;

pub use models::*;
