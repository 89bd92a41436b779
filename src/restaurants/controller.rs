//! Restaurant resource controller.
//!
//! # Responsibilities
//! - Map each routed action onto one persistence call
//! - Load the target record before show/edit/update/destroy
//! - Whitelist payloads before they reach the store
//! - Produce a view to render or a location to redirect to
//!
//! # Design Decisions
//! - The store is injected at construction; the controller holds no other state
//! - `load_by_id` is called explicitly at the top of each member action
//! - Rendering is left to the HTTP layer; actions return plain data

use std::sync::Arc;

use thiserror::Error;

use crate::http::request::Payload;
use crate::restaurants::model::{
    leading_integer, ParamsError, Restaurant, RestaurantDraft, RestaurantParams,
};
use crate::routing::{paths, Action, RouteMatch};
use crate::store::{RestaurantStore, StoreError};

/// Data for a page render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Index(Vec<Restaurant>),
    New(RestaurantDraft),
    Show(Restaurant),
    Edit(Restaurant),
}

/// What an action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render(View),
    Redirect(String),
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Couldn't find Restaurant with 'id'={id}")]
    NotFound { id: String },

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ControllerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ControllerError::NotFound { id: id.to_string() },
            other => ControllerError::Store(other),
        }
    }
}

pub type ControllerResult = Result<Outcome, ControllerError>;

pub struct RestaurantsController {
    store: Arc<dyn RestaurantStore>,
}

impl RestaurantsController {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }

    /// Run the action selected by the router.
    pub async fn dispatch(&self, route: &RouteMatch, payload: &Payload) -> ControllerResult {
        let id = route.param("id").unwrap_or_default();
        match route.action {
            Action::Index => self.index().await,
            Action::New => self.new_form(),
            Action::Show => self.show(id).await,
            Action::Create => self.create(payload).await,
            Action::Edit => self.edit(id).await,
            Action::Update => self.update(id, payload).await,
            Action::Destroy => self.destroy(id).await,
        }
    }

    /// Fetch the restaurant a member action operates on.
    ///
    /// The id is cast by its leading integer, so `1-tonys` loads record 1.
    /// An id without leading digits can never exist and is `NotFound`.
    pub async fn load_by_id(&self, id: &str) -> Result<Restaurant, ControllerError> {
        let parsed = leading_integer(id).ok_or_else(|| ControllerError::NotFound {
            id: id.to_string(),
        })?;
        Ok(self.store.find(parsed).await?)
    }

    pub async fn index(&self) -> ControllerResult {
        let restaurants = self.store.all().await?;
        Ok(Outcome::Render(View::Index(restaurants)))
    }

    pub fn new_form(&self) -> ControllerResult {
        Ok(Outcome::Render(View::New(RestaurantDraft::default())))
    }

    pub async fn show(&self, id: &str) -> ControllerResult {
        let restaurant = self.load_by_id(id).await?;
        Ok(Outcome::Render(View::Show(restaurant)))
    }

    pub async fn create(&self, payload: &Payload) -> ControllerResult {
        let params = RestaurantParams::permit(payload)?;
        let restaurant = self
            .store
            .create(params.merge_into(RestaurantDraft::default()))
            .await?;

        tracing::info!(restaurant_id = restaurant.id, "Restaurant created");
        Ok(Outcome::Redirect(paths::restaurants()))
    }

    pub async fn edit(&self, id: &str) -> ControllerResult {
        let restaurant = self.load_by_id(id).await?;
        Ok(Outcome::Render(View::Edit(restaurant)))
    }

    pub async fn update(&self, id: &str, payload: &Payload) -> ControllerResult {
        let restaurant = self.load_by_id(id).await?;
        let params = RestaurantParams::permit(payload)?;

        let updated = self
            .store
            .update(restaurant.id, params.merge_into(restaurant.draft()))
            .await?;

        tracing::info!(restaurant_id = updated.id, "Restaurant updated");
        Ok(Outcome::Redirect(paths::restaurant(updated.id)))
    }

    pub async fn destroy(&self, id: &str) -> ControllerResult {
        let restaurant = self.load_by_id(id).await?;
        self.store.delete(restaurant.id).await?;

        tracing::info!(restaurant_id = restaurant.id, "Restaurant destroyed");
        Ok(Outcome::Redirect(paths::restaurants()))
    }
}
