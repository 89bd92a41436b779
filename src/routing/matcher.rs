//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse route patterns (`/restaurants/:id/edit`) into segments
//! - Match a request path against a pattern, segment by segment
//! - Extract named parameters
//!
//! # Design Decisions
//! - Static segments are compared case-sensitively
//! - A parameter segment matches exactly one non-empty path segment
//! - Request segments are percent-decoded before comparison
//! - A single trailing slash on the request path is ignored
//! - No regex, no wildcards

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

/// One segment of a compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text that must match exactly.
    Static(String),
    /// Named parameter (`:id`) capturing a single segment.
    Param(String),
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile a pattern such as `/restaurants/:id`.
    pub fn parse(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|seg| match seg.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Static(seg.to_string()),
            })
            .collect();

        Self {
            source: pattern.to_string(),
            segments,
        }
    }

    /// The pattern as originally written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match `path` against this pattern, returning extracted parameters.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = split_path(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, raw) in self.segments.iter().zip(parts) {
            let part = percent_decode_str(raw).decode_utf8_lossy();
            match segment {
                Segment::Static(expected) if *expected == part => {}
                Segment::Static(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.into_owned());
                }
            }
        }
        Some(params)
    }
}

/// Split a path into segments, ignoring the leading slash and one trailing slash.
fn split_path(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    // "/" alone yields no segments rather than one empty segment
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}
