pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod export;
pub mod hos;
pub mod models;
pub mod service;

pub use error::{AppError, Result};
