//! KidsTube GraphQL gateway
//!
//! Read-oriented GraphQL facade over the KidsTube document store, plus
//! proxies for the backend's country list and YouTube search.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod services;

pub use app::{AppState, build_app};
pub use config::Config;
pub use error::ApiError;
