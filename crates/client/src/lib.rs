pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod views;

pub use error::{AppError, Result};
