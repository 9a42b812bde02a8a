// Application layer - Use cases that coordinate the gateway, cache and view
pub mod error;
pub mod gateway;
pub mod orchestrator;
pub mod page_cache;
pub mod session;
pub mod taxi_api;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
