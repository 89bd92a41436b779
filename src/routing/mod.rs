//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (effective method, path)
//!     → router.rs (route table lookup)
//!     → matcher.rs (segment match, parameter extraction)
//!     → Return: RouteMatch { action, params } or RouteNotFound
//! ```
//!
//! # Design Decisions
//! - Route table is static and built once at startup
//! - Deterministic: same input always resolves to the same action
//! - Path helpers live next to the table so links and routes agree

pub mod matcher;
pub mod router;

pub use router::{Action, Route, RouteError, RouteMatch, Router};

/// Canonical paths for links and redirects.
pub mod paths {
    pub fn restaurants() -> String {
        "/restaurants".to_string()
    }

    pub fn new_restaurant() -> String {
        "/restaurant/new".to_string()
    }

    pub fn restaurant(id: i64) -> String {
        format!("/restaurants/{}", id)
    }

    pub fn edit_restaurant(id: i64) -> String {
        format!("/restaurants/{}/edit", id)
    }

}
