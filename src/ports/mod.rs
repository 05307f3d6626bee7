// src/ports/mod.rs
pub mod http;
pub mod openapi;

pub use http::router;
