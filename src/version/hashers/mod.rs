//! Concrete artifact hasher implementations

pub mod http;

pub use http::HttpHasher;
