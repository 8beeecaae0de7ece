pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod id;
pub mod models;
pub mod render;
pub mod server;

pub use error::{ApiError, ApiResult};
