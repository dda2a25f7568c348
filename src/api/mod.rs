//! Backend REST access: request descriptions and the HTTP client that runs them.

pub mod client;
pub mod request;

#[cfg(test)]
mod tests;

pub use client::ApiClient;
pub use request::{ApiRequest, Method};
