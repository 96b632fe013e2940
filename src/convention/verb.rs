//! HTTP verbs recognized as method-name prefixes.

use std::fmt;

use axum::http::Method;
use axum::routing::MethodFilter;
use serde::Serialize;

/// One of the RFC 7231 section 4.3 request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Head,
    Options,
    Put,
    Delete,
    Connect,
    Trace,
}

impl Verb {
    /// All verbs in prefix-matching order.
    pub const ALL: [Verb; 8] = [
        Verb::Get,
        Verb::Post,
        Verb::Head,
        Verb::Options,
        Verb::Put,
        Verb::Delete,
        Verb::Connect,
        Verb::Trace,
    ];

    /// Upper-case token, as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Head => "HEAD",
            Verb::Options => "OPTIONS",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Connect => "CONNECT",
            Verb::Trace => "TRACE",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Head => Method::HEAD,
            Verb::Options => Method::OPTIONS,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
            Verb::Connect => Method::CONNECT,
            Verb::Trace => Method::TRACE,
        }
    }

    pub fn method_filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Head => MethodFilter::HEAD,
            Verb::Options => MethodFilter::OPTIONS,
            Verb::Put => MethodFilter::PUT,
            Verb::Delete => MethodFilter::DELETE,
            Verb::Connect => MethodFilter::CONNECT,
            Verb::Trace => MethodFilter::TRACE,
        }
    }

    /// Maps a request method back to a verb. PATCH and extension methods have none.
    pub fn from_method(method: &Method) -> Option<Verb> {
        Verb::ALL.into_iter().find(|v| v.method() == *method)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded verb, or the sentinel meaning "every verb the router knows".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerbSpec {
    Verb(Verb),
    Any,
}

impl VerbSpec {
    /// Whether a request with `method` is served by a binding with this verb.
    pub fn accepts(self, method: &Method) -> bool {
        match self {
            VerbSpec::Any => true,
            VerbSpec::Verb(v) => v.method() == *method,
        }
    }
}

impl From<Verb> for VerbSpec {
    fn from(verb: Verb) -> Self {
        VerbSpec::Verb(verb)
    }
}

impl fmt::Display for VerbSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerbSpec::Verb(v) => v.fmt(f),
            VerbSpec::Any => f.write_str("ANY"),
        }
    }
}
