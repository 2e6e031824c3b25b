pub mod api;
pub mod category;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod shell;
pub mod web;
