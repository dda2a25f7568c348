pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod flows;
pub mod models;
pub mod notify;
pub mod panel;
pub mod ui;

pub use error::{AppError, Result};
