// src/server/mod.rs
mod builder;
mod error;
mod handler;
pub mod routes;

pub use builder::ServerBuilder;
pub use error::ApiError;
pub use handler::{AppState, RequestHandler};
