//! Shared helpers for portfolio-server integration tests

pub mod mock_store;

#[allow(unused_imports)]
pub use mock_store::MockStore;
