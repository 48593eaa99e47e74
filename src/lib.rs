//! Server-rendered blog backed by an external posts API.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pages;

pub use api::{ApiClient, Envelope, StatusMessageTable};
pub use config::schema::BlogConfig;
pub use http::BlogServer;
pub use lifecycle::Shutdown;
