pub mod chart;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod feed;
pub mod models;
pub mod normalize;
pub mod report;
pub mod ui;

pub use error::{AppError, Result};
