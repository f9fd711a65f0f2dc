//! Unit tests for deployment tracking
