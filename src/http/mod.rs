//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch handler)
//!     → request.rs (buffer body, decode payload, method override)
//!     → [routing resolves the action]
//!     → [controller runs the action]
//!     → response.rs (HTML page, redirect, or error page)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{Payload, PayloadError, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
