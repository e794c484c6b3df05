//! Dataset metadata consumed by the compiler: variables, resources, requests.

pub mod request;
pub mod types;
