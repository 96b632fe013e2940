//! Method-name decoding.
//!
//! # Rules (first match wins)
//! - `Action<Name>` → any verb, segment `kebab(<Name>)`
//! - `<Verb><Name>` → that verb, segment `kebab(<Name>)`; `<Verb>` alone is the index
//! - anything else is not a route (hooks, helpers)
//!
//! Verb matching uppercases the name and checks the verbs in
//! [`Verb::ALL`] order. It is a plain prefix test, so `Getter` decodes as
//! GET with the segment `ter`. Consumers rely on this; keep it.

use crate::convention::case::kebab_case;
use crate::convention::verb::{Verb, VerbSpec};

/// Literal prefix that binds a method under every verb.
pub const ACTION_MARKER: &str = "Action";

/// Verb and path segment decoded from one method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodBinding {
    pub verb: VerbSpec,
    /// Kebab-case segment; empty for the index route.
    pub segment: String,
}

/// Decodes a method name, returning `None` when the method is not a route.
pub fn decode(method_name: &str) -> Option<MethodBinding> {
    if let Some(rest) = method_name.strip_prefix(ACTION_MARKER) {
        return Some(MethodBinding {
            verb: VerbSpec::Any,
            segment: kebab_case(rest),
        });
    }

    let verb = verb_prefix(method_name)?;
    let rest = &method_name[verb.as_str().len()..];

    Some(MethodBinding {
        verb: VerbSpec::Verb(verb),
        segment: kebab_case(rest),
    })
}

fn verb_prefix(name: &str) -> Option<Verb> {
    Verb::ALL.into_iter().find(|verb| {
        let token = verb.as_str();
        name.get(..token.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(token))
    })
}
