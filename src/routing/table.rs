//! In-memory route table.
//!
//! Records every binding in registration order. Used to inspect what a
//! controller produces (the `routes` CLI command) and to dispatch requests
//! without an HTTP stack in tests.

use axum::http::Method;
use serde::Serialize;

use crate::controller::{Context, HandlerChain};
use crate::convention::{Verb, VerbSpec};
use crate::routing::sink::{BindError, BoundRoutes, RouteSink};

/// One recorded binding.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub verb: VerbSpec,
    pub path: String,
    pub chain: HandlerChain,
}

/// Serializable view of a [`RouteEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub verb: String,
    pub path: String,
    pub handlers: Vec<String>,
}

#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    bound: BoundRoutes,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the entry serving `method` on `path`. An exact verb binding
    /// wins over an ANY binding.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<&RouteEntry> {
        let on_path = || self.entries.iter().filter(move |e| e.path == path);
        on_path()
            .find(|e| matches!(e.verb, VerbSpec::Verb(v) if v.method() == *method))
            .or_else(|| on_path().find(|e| e.verb.accepts(method)))
    }

    /// Runs the matching chain against `ctx`. Returns `false` when no route
    /// matches the context's method and path.
    pub fn dispatch(&self, ctx: &mut Context) -> bool {
        match self.lookup(ctx.method(), ctx.path()) {
            Some(entry) => {
                entry.chain.run(ctx);
                true
            }
            None => false,
        }
    }

    pub fn summaries(&self) -> Vec<RouteSummary> {
        self.entries
            .iter()
            .map(|e| RouteSummary {
                verb: e.verb.to_string(),
                path: e.path.clone(),
                handlers: e.chain.names(),
            })
            .collect()
    }

    fn record(&mut self, verb: VerbSpec, path: &str, chain: HandlerChain) -> Result<(), BindError> {
        self.bound.claim(verb, path)?;
        self.entries.push(RouteEntry {
            verb,
            path: path.to_string(),
            chain,
        });
        Ok(())
    }
}

impl RouteSink for RouteTable {
    fn handle(&mut self, verb: Verb, path: &str, chain: HandlerChain) -> Result<(), BindError> {
        self.record(VerbSpec::Verb(verb), path, chain)
    }

    fn any(&mut self, path: &str, chain: HandlerChain) -> Result<(), BindError> {
        self.record(VerbSpec::Any, path, chain)
    }
}
