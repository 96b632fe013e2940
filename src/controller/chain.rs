//! Handler chains bound to a single route.

use std::fmt;
use std::sync::Arc;

use crate::controller::context::Context;

/// A handler bound to its controller.
pub type HandlerFn = Arc<dyn Fn(&mut Context) + Send + Sync>;

/// A named, bound handler.
#[derive(Clone)]
pub struct Handler {
    name: String,
    func: HandlerFn,
}

impl Handler {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, ctx: &mut Context) {
        (self.func)(ctx)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.name).finish()
    }
}

/// Ordered `[Before?, action, After?]` handlers of one route.
#[derive(Debug, Clone)]
pub struct HandlerChain {
    handlers: Vec<Handler>,
}

impl HandlerChain {
    /// Assembles a chain. `before` always runs first and `after` last.
    pub fn assemble(before: Option<Handler>, action: Handler, after: Option<Handler>) -> Self {
        let mut handlers = Vec::with_capacity(3);
        handlers.extend(before);
        handlers.push(action);
        handlers.extend(after);
        Self { handlers }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    pub fn names(&self) -> Vec<String> {
        self.handlers.iter().map(|h| h.name.clone()).collect()
    }

    /// Runs the chain for one request. A handler that aborts the context
    /// stops the handlers after it.
    pub fn run(&self, ctx: &mut Context) {
        for handler in &self.handlers {
            handler.call(ctx);
            if ctx.is_aborted() {
                tracing::trace!(handler = %handler.name, "Chain aborted");
                break;
            }
        }
    }
}
