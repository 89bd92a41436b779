//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with a single dispatch handler
//! - Wire up middleware (request id, tracing, timeout, security headers)
//! - Decode the request, resolve the route, run the controller action
//! - Serve on a listener until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::request::{self, Payload};
use crate::lifecycle::ShutdownListener;
use crate::restaurants::RestaurantsController;
use crate::routing::Router as RouteTable;
use crate::store::RestaurantStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub controller: Arc<RestaurantsController>,
    pub max_body_size: usize,
}

/// HTTP server for the restaurant application.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server backed by `store`.
    pub fn new(config: AppConfig, store: Arc<dyn RestaurantStore>) -> Self {
        let state = AppState {
            routes: Arc::new(RouteTable::restaurants()),
            controller: Arc::new(RestaurantsController::new(store)),
            max_body_size: config.security.max_body_size,
        };

        Self {
            router: Self::build_router(&config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", any(dispatch))
            .route("/{*path}", any(dispatch))
            .with_state(state);

        if config.security.enable_headers {
            router = router
                .layer(SetResponseHeaderLayer::if_not_present(
                    axum::http::header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    axum::http::header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                ));
        }

        // Outermost first: the id is set before tracing sees the request
        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point: decode, route, act, respond.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let request_id = request::request_id(&parts.headers);
    let path = parts.uri.path().to_string();

    let payload = match request::read_body(body, state.max_body_size)
        .await
        .and_then(|bytes| Payload::decode(&parts.headers, &bytes))
    {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(request_id = %request_id, path = %path, error = %e, "Rejected request body");
            return e.into_response();
        }
    };

    let method = request::effective_method(&parts.method, &parts.headers, &payload);

    let route = match state.routes.resolve(&method, &path) {
        Ok(route) => route,
        Err(e) => {
            tracing::warn!(request_id = %request_id, method = %method, path = %path, "No route matched");
            return e.into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        action = %route.action,
        "Dispatching request"
    );

    match state.controller.dispatch(&route, &payload).await {
        Ok(outcome) => outcome.into_response(),
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                action = %route.action,
                error = %e,
                "Action failed"
            );
            e.into_response()
        }
    }
}
