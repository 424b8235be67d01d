//! Services orchestrating repositories and external capabilities.

pub mod credentials;
pub mod store;
