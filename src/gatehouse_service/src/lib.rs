pub mod routes;
pub mod service;
pub mod tracing;

// Re-export for convenience
pub use routes::ApiError;
pub use service::{AllowedOrigins, AuthService};
