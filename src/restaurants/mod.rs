//! Restaurant resource.
//!
//! # Data Flow
//! ```text
//! RouteMatch + Payload
//!     → controller.rs (load_by_id precondition, whitelist, store call)
//!     → Outcome::Render(View) → views.rs (maud page)
//!     → Outcome::Redirect(path)
//! ```

pub mod controller;
pub mod model;
pub mod views;

pub use controller::{ControllerError, Outcome, RestaurantsController, View};
pub use model::{Restaurant, RestaurantDraft, RestaurantParams};
