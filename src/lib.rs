// Library root - the layers shared by the binary and the integration tests
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
