//! Rate provider implementations

pub mod fixed;
pub mod http;

pub use fixed::*;
pub use http::*;
