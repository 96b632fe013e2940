//! The router capability the registrar binds routes into.

use std::collections::{HashMap, HashSet};

use axum::http::Method;
use thiserror::Error;

use crate::controller::HandlerChain;
use crate::convention::{Verb, VerbSpec};

/// Something that can register handler chains under a verb and path.
///
/// Every successful call commits the binding immediately; there is no
/// un-registration.
pub trait RouteSink {
    /// Registers `chain` for `verb` requests to `path`.
    fn handle(&mut self, verb: Verb, path: &str, chain: HandlerChain) -> Result<(), BindError>;

    /// Registers `chain` for every verb the router recognizes on `path`.
    fn any(&mut self, path: &str, chain: HandlerChain) -> Result<(), BindError>;
}

/// Errors raised by a sink when it refuses a binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The (verb, path) pair, or an overlapping ANY binding, already exists.
    #[error("route {verb} {path} conflicts with an existing binding")]
    Conflict { verb: VerbSpec, path: String },

    /// The router cannot represent the path.
    #[error("invalid route path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

/// Checks that `path` is a literal route path: absolute, and free of the
/// characters axum reads as captures or wildcards.
pub fn check_path(path: &str) -> Result<(), &'static str> {
    if !path.starts_with('/') {
        return Err("paths must start with '/'");
    }
    if path.contains(['{', '}']) {
        return Err("braces are reserved for path parameters");
    }
    if path.contains('*') {
        return Err("'*' is reserved for wildcards");
    }
    if path.split('/').any(|segment| segment.starts_with(':')) {
        return Err("segments must not start with ':'");
    }
    Ok(())
}

/// Tracks which verbs are taken on which paths.
///
/// An ANY binding overlaps every verb on its path, in both directions.
#[derive(Debug, Clone, Default)]
pub struct BoundRoutes {
    paths: HashMap<String, PathBindings>,
}

#[derive(Debug, Clone, Default)]
struct PathBindings {
    any: bool,
    verbs: HashSet<Verb>,
}

impl BoundRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves `verb` on `path`, failing on overlap or on a path the
    /// router would refuse.
    pub fn claim(&mut self, verb: VerbSpec, path: &str) -> Result<(), BindError> {
        check_path(path).map_err(|reason| BindError::InvalidPath {
            path: path.to_string(),
            reason,
        })?;

        let bindings = self.paths.entry(path.to_string()).or_default();
        let taken = match verb {
            VerbSpec::Any => bindings.any || !bindings.verbs.is_empty(),
            VerbSpec::Verb(v) => bindings.any || bindings.verbs.contains(&v),
        };
        if taken {
            return Err(BindError::Conflict {
                verb,
                path: path.to_string(),
            });
        }

        match verb {
            VerbSpec::Any => bindings.any = true,
            VerbSpec::Verb(v) => {
                bindings.verbs.insert(v);
            }
        }
        Ok(())
    }

    /// Whether a binding on `path` serves `method`. ANY serves every method.
    pub fn serves(&self, method: &Method, path: &str) -> bool {
        self.paths.get(path).is_some_and(|b| {
            b.any || Verb::from_method(method).is_some_and(|v| b.verbs.contains(&v))
        })
    }

    pub fn len(&self) -> usize {
        self.paths
            .values()
            .map(|b| b.verbs.len() + usize::from(b.any))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_verbs_share_a_path() {
        let mut bound = BoundRoutes::new();
        assert!(bound.claim(VerbSpec::Verb(Verb::Get), "/endpoint").is_ok());
        assert!(bound.claim(VerbSpec::Verb(Verb::Post), "/endpoint").is_ok());
        assert_eq!(bound.len(), 2);
    }

    #[test]
    fn test_duplicate_verb_conflicts() {
        let mut bound = BoundRoutes::new();
        bound.claim(VerbSpec::Verb(Verb::Get), "/x").unwrap();
        assert_eq!(
            bound.claim(VerbSpec::Verb(Verb::Get), "/x"),
            Err(BindError::Conflict { verb: VerbSpec::Verb(Verb::Get), path: "/x".into() })
        );
    }

    #[test]
    fn test_any_overlaps_both_ways() {
        let mut bound = BoundRoutes::new();
        bound.claim(VerbSpec::Any, "/known").unwrap();
        assert!(bound.claim(VerbSpec::Verb(Verb::Put), "/known").is_err());

        bound.claim(VerbSpec::Verb(Verb::Get), "/other").unwrap();
        assert!(bound.claim(VerbSpec::Any, "/other").is_err());

        // Trailing slash makes a different path.
        assert!(bound.claim(VerbSpec::Any, "/known/").is_ok());
    }

    #[test]
    fn test_serves() {
        let mut bound = BoundRoutes::new();
        bound.claim(VerbSpec::Verb(Verb::Get), "/x").unwrap();
        bound.claim(VerbSpec::Any, "/known").unwrap();

        assert!(bound.serves(&Method::GET, "/x"));
        assert!(!bound.serves(&Method::POST, "/x"));
        assert!(!bound.serves(&Method::GET, "/x/"));
        assert!(bound.serves(&Method::PATCH, "/known"));
    }

    #[test]
    fn test_router_syntax_rejected() {
        let mut bound = BoundRoutes::new();
        for path in ["/{", "/a/{id}", "/files/*rest", "/:id", "/a/:b/c"] {
            assert!(
                matches!(bound.claim(VerbSpec::Any, path), Err(BindError::InvalidPath { .. })),
                "{path}"
            );
        }
        assert!(bound.is_empty());
        assert!(check_path("/a:b/c-d/über").is_ok());
    }

    #[test]
    fn test_relative_path_rejected() {
        let mut bound = BoundRoutes::new();
        assert!(matches!(
            bound.claim(VerbSpec::Any, "known"),
            Err(BindError::InvalidPath { .. })
        ));
        assert!(bound.is_empty());
    }
}
