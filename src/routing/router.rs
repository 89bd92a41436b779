//! Route lookup.
//!
//! # Responsibilities
//! - Store the compiled route table
//! - Resolve (method, path) to an action plus path parameters
//! - Return an explicit `RouteNotFound` rather than a silent default
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - O(n) scan in table order; first match wins
//! - HEAD resolves as GET

use std::collections::HashMap;
use std::fmt;

use axum::http::Method;
use thiserror::Error;

use crate::routing::matcher::RoutePattern;

/// Controller actions reachable through the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Index,
    New,
    Show,
    Create,
    Edit,
    Update,
    Destroy,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Index => "index",
            Action::New => "new",
            Action::Show => "show",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Update => "update",
            Action::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of the route table.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: RoutePattern,
    pub action: Action,
}

impl Route {
    pub fn new(method: Method, pattern: &str, action: Action) -> Self {
        Self {
            method,
            pattern: RoutePattern::parse(pattern),
            action,
        }
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub action: Action,
    pub params: HashMap<String, String>,
}

impl RouteMatch {
    /// Look up a path parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("No route matches [{method}] \"{path}\"")]
    RouteNotFound { method: Method, path: String },
}

/// Immutable route table.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The restaurant resource table.
    ///
    /// `/restaurant/new` is singular while every other path is plural.
    /// Existing links depend on that shape, so it stays.
    pub fn restaurants() -> Self {
        Self::new(vec![
            Route::new(Method::GET, "/restaurants", Action::Index),
            Route::new(Method::GET, "/restaurant/new", Action::New),
            Route::new(Method::GET, "/restaurants/:id", Action::Show),
            Route::new(Method::GET, "/restaurants/:id/edit", Action::Edit),
            Route::new(Method::POST, "/restaurants", Action::Create),
            Route::new(Method::PATCH, "/restaurants/:id", Action::Update),
            Route::new(Method::DELETE, "/restaurants/:id", Action::Destroy),
        ])
    }

    /// Resolve a request to an action.
    pub fn resolve(&self, method: &Method, path: &str) -> Result<RouteMatch, RouteError> {
        let lookup = if method == Method::HEAD {
            Method::GET
        } else {
            method.clone()
        };

        self.routes
            .iter()
            .filter(|route| route.method == lookup)
            .find_map(|route| {
                route.pattern.matches(path).map(|params| RouteMatch {
                    action: route.action,
                    params,
                })
            })
            .ok_or_else(|| RouteError::RouteNotFound {
                method: method.clone(),
                path: path.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(method: Method, path: &str) -> Result<RouteMatch, RouteError> {
        Router::restaurants().resolve(&method, path)
    }

    #[test]
    fn test_route_table() {
        let cases = [
            (Method::GET, "/restaurants", Action::Index),
            (Method::GET, "/restaurant/new", Action::New),
            (Method::GET, "/restaurants/3", Action::Show),
            (Method::GET, "/restaurants/3/edit", Action::Edit),
            (Method::POST, "/restaurants", Action::Create),
            (Method::PATCH, "/restaurants/3", Action::Update),
            (Method::DELETE, "/restaurants/3", Action::Destroy),
        ];

        for (method, path, action) in cases {
            let matched = resolve(method.clone(), path)
                .unwrap_or_else(|e| panic!("{} {} should resolve: {}", method, path, e));
            assert_eq!(matched.action, action, "{} {}", method, path);
        }
    }

    #[test]
    fn test_id_param() {
        let matched = resolve(Method::GET, "/restaurants/42/edit").unwrap();
        assert_eq!(matched.param("id"), Some("42"));
        assert_eq!(matched.param("missing"), None);

        let matched = resolve(Method::GET, "/restaurants").unwrap();
        assert!(matched.params.is_empty());
    }

    #[test]
    fn test_plural_new_is_a_show() {
        // Only the singular form is the new-form route
        let matched = resolve(Method::GET, "/restaurants/new").unwrap();
        assert_eq!(matched.action, Action::Show);
        assert_eq!(matched.param("id"), Some("new"));
    }

    #[test]
    fn test_route_not_found() {
        let err = resolve(Method::GET, "/menus").unwrap_err();
        assert_eq!(
            err,
            RouteError::RouteNotFound {
                method: Method::GET,
                path: "/menus".into()
            }
        );
        assert_eq!(err.to_string(), "No route matches [GET] \"/menus\"");

        // Method must match exactly
        assert!(resolve(Method::PUT, "/restaurants/1").is_err());
        assert!(resolve(Method::DELETE, "/restaurants").is_err());
        assert!(resolve(Method::POST, "/restaurant/new").is_err());
        assert!(resolve(Method::GET, "/").is_err());
    }

    #[test]
    fn test_encoded_id_is_decoded() {
        let matched = resolve(Method::GET, "/restaurants/%31/edit").unwrap();
        assert_eq!(matched.action, Action::Edit);
        assert_eq!(matched.param("id"), Some("1"));
    }

    #[test]
    fn test_head_resolves_as_get() {
        let matched = resolve(Method::HEAD, "/restaurants/9").unwrap();
        assert_eq!(matched.action, Action::Show);
    }

    #[test]
    fn test_trailing_slash() {
        assert_eq!(resolve(Method::GET, "/restaurants/").unwrap().action, Action::Index);
        assert_eq!(resolve(Method::GET, "/restaurants/5/edit/").unwrap().action, Action::Edit);
    }

    #[test]
    fn test_action_names() {
        assert_eq!(Action::Destroy.to_string(), "destroy");
        assert_eq!(Action::New.as_str(), "new");
    }
}
