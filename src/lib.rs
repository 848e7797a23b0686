pub mod catalog;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;

pub use error::{AppError, AppResult};
pub use state::AppState;
