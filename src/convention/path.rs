//! Route path composition.

use crate::convention::case::kebab_case;

/// Type-name prefix stripped when deriving a controller's base path.
pub const CONTROLLER_PREFIX: &str = "Controller";

/// Derives the controller base path segment from its type name.
///
/// `ControllerWidget` → `Some("widget")`, `Controller` → `None`.
pub fn controller_prefix(type_name: &str) -> Option<String> {
    let rest = type_name.strip_prefix(CONTROLLER_PREFIX).unwrap_or(type_name);
    if rest.is_empty() {
        None
    } else {
        Some(kebab_case(rest))
    }
}

/// Joins an optional controller prefix with a decoded segment.
///
/// The index route of a prefixed controller keeps its trailing slash
/// (`/widget/`). With `append_slash` a `/` is added unless already present.
pub fn compose(prefix: Option<&str>, segment: &str, append_slash: bool) -> String {
    let mut path = match prefix {
        Some(prefix) => format!("/{prefix}/{segment}"),
        None => format!("/{segment}"),
    };

    if append_slash && !path.ends_with('/') {
        path.push('/');
    }
    path
}

/// Joins a router base path with a route path, gin style: a trailing slash
/// on `relative` survives the join.
pub fn join_paths(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        return if base.is_empty() { "/".to_string() } else { base.to_string() };
    }

    let base = base.trim_end_matches('/');
    let relative = relative.trim_start_matches('/');
    let joined = format!("{base}/{relative}");

    if joined.starts_with('/') {
        joined
    } else {
        format!("/{joined}")
    }
}
