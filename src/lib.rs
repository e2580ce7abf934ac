pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod state;
pub mod store;
pub mod views;

pub use api::router;
pub use error::VocabError;
pub use state::AppState;
