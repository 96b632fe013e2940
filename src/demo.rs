//! Controllers served by the `autoroute` binary.
//!
//! `ControllerRoot` is embedded at the base path; `ControllerNotes` is
//! attached under `/notes`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::controller::{Context, Controller, MethodSet};
use crate::routing::{RegistrationResult, Registrar, RouteSink};

/// Service banner and liveness probe.
#[derive(Debug, Default)]
pub struct ControllerRoot;

impl ControllerRoot {
    fn get(&self, ctx: &mut Context) {
        ctx.string(StatusCode::OK, concat!("autoroute ", env!("CARGO_PKG_VERSION")));
    }

    fn get_health(&self, ctx: &mut Context) {
        ctx.json(StatusCode::OK, &serde_json::json!({ "status": "ok" }));
    }
}

impl Controller for ControllerRoot {
    fn methods() -> MethodSet<Self> {
        MethodSet::new()
            .handler("Get", Self::get)
            .handler("GetHealth", Self::get_health)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct NewNote {
    text: String,
}

/// In-memory note store.
#[derive(Debug, Default)]
pub struct ControllerNotes {
    notes: Mutex<Vec<Note>>,
    next_id: AtomicU64,
}

/// Marker stored in the context by `Before`.
#[derive(Debug, Clone, Copy)]
struct Started(Instant);

impl ControllerNotes {
    fn notes(&self) -> MutexGuard<'_, Vec<Note>> {
        self.notes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn add(&self, text: impl Into<String>) -> Note {
        let note = Note {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            text: text.into(),
        };
        self.notes().push(note.clone());
        note
    }

    pub fn len(&self) -> usize {
        self.notes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn init(&self) -> Result<(), std::convert::Infallible> {
        if self.is_empty() {
            self.add("welcome to autoroute");
        }
        Ok(())
    }

    fn before(&self, ctx: &mut Context) {
        ctx.insert(Started(Instant::now()));
    }

    fn after(&self, ctx: &mut Context) {
        let elapsed = ctx.get::<Started>().map(|s| s.0.elapsed());
        tracing::debug!(
            method = %ctx.method(),
            path = ctx.path(),
            status = ctx.response_status().as_u16(),
            elapsed = ?elapsed,
            "Notes request handled"
        );
    }

    fn get(&self, ctx: &mut Context) {
        let notes = self.notes().clone();
        ctx.json(StatusCode::OK, &notes);
    }

    fn get_count(&self, ctx: &mut Context) {
        let count = self.len();
        ctx.json(StatusCode::OK, &serde_json::json!({ "count": count }));
    }

    fn post(&self, ctx: &mut Context) {
        match ctx.bind_json::<NewNote>() {
            Ok(new) if !new.text.trim().is_empty() => {
                let note = self.add(new.text);
                ctx.json(StatusCode::CREATED, &note);
            }
            Ok(_) => ctx.string(StatusCode::UNPROCESSABLE_ENTITY, "note text must not be empty"),
            Err(e) => ctx.string(StatusCode::BAD_REQUEST, format!("invalid note: {e}")),
        }
    }

    fn delete(&self, ctx: &mut Context) {
        self.notes().clear();
        ctx.status(StatusCode::NO_CONTENT);
    }

    fn action_ping(&self, ctx: &mut Context) {
        ctx.string(StatusCode::OK, "pong");
    }
}

impl Controller for ControllerNotes {
    fn methods() -> MethodSet<Self> {
        MethodSet::new()
            .init("Init", Self::init)
            .handler("Before", Self::before)
            .handler("After", Self::after)
            .handler("Get", Self::get)
            .handler("GetCount", Self::get_count)
            .handler("Post", Self::post)
            .handler("Delete", Self::delete)
            .handler("ActionPing", Self::action_ping)
    }
}

/// Registers the demo controllers with `sink`.
pub fn register_all<S>(registrar: &Registrar, sink: &mut S) -> RegistrationResult
where
    S: RouteSink + ?Sized,
{
    registrar.embed(sink, std::sync::Arc::new(ControllerRoot))?;
    registrar.attach(sink, std::sync::Arc::new(ControllerNotes::default()))?;
    Ok(())
}
