//! Client side of the AppSense search API.

pub mod client;
pub mod models;

pub use client::{SearchBackend, SearchClient, SearchRequest};
pub use models::{AppResult, CategoriesResponse, HealthResponse, SearchResponse};
