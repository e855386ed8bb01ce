#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_engine;
pub mod progress_service;
pub mod progress_store;
pub mod progress_view;
pub mod rewards;

pub use app_services::AppServices;
pub use error::{AppServicesError, ProgressError};
pub use progress_engine::ProgressEngine;
pub use progress_service::ProgressService;
pub use progress_store::ProgressStore;
pub use progress_view::{CategoryProgress, ProgressSnapshot, ProgressUpdate};
