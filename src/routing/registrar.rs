//! Controller registration.
//!
//! # Steps
//! 1. Reject receivers passed by value
//! 2. Reject empty method tables
//! 3. Derive the controller prefix (attach only)
//! 4. Resolve `Before`/`After`/`Init`, validate their shapes, run `Init` once
//! 5. Decode, compose and bind every route method in enumeration order
//!
//! Bindings are committed to the sink one by one. A failure in step 5
//! leaves the earlier bindings in place; the sink has no way to remove them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::controller::{Callable, Controller, Handler, HandlerChain, MethodSet, Receiver};
use crate::convention::{compose, controller_prefix, decode, VerbSpec};
use crate::observability::metrics;
use crate::routing::error::{RegistrationError, RegistrationResult};
use crate::routing::sink::RouteSink;

/// Name of the one-time initialization hook.
pub const INIT_HOOK: &str = "Init";
/// Name of the hook run before every action.
pub const BEFORE_HOOK: &str = "Before";
/// Name of the hook run after every action.
pub const AFTER_HOOK: &str = "After";

static APPEND_TRAILING_SLASH: AtomicBool = AtomicBool::new(false);

/// Sets the process-wide trailing-slash policy used by [`attach_controller`]
/// and [`embed_controller`]. Set it before registering; each registration
/// reads it once when it starts.
pub fn set_append_trailing_slash(on: bool) {
    APPEND_TRAILING_SLASH.store(on, Ordering::SeqCst);
}

pub fn append_trailing_slash() -> bool {
    APPEND_TRAILING_SLASH.load(Ordering::SeqCst)
}

/// Registers `instance` under its derived controller prefix.
pub fn attach_controller<C, S>(sink: &mut S, instance: impl Into<Receiver<C>>) -> RegistrationResult
where
    C: Controller,
    S: RouteSink + ?Sized,
{
    Registrar::from_global().attach(sink, instance)
}

/// Registers `instance` directly at the sink's base path.
pub fn embed_controller<C, S>(sink: &mut S, instance: impl Into<Receiver<C>>) -> RegistrationResult
where
    C: Controller,
    S: RouteSink + ?Sized,
{
    Registrar::from_global().embed(sink, instance)
}

/// Options fixed for the duration of a registration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrarOptions {
    pub append_trailing_slash: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Registrar {
    options: RegistrarOptions,
}

impl Registrar {
    pub fn new(options: RegistrarOptions) -> Self {
        Self { options }
    }

    /// Registrar with a snapshot of the process-wide options.
    pub fn from_global() -> Self {
        Self::new(RegistrarOptions {
            append_trailing_slash: append_trailing_slash(),
        })
    }

    pub fn options(&self) -> RegistrarOptions {
        self.options
    }

    pub fn attach<C, S>(&self, sink: &mut S, instance: impl Into<Receiver<C>>) -> RegistrationResult
    where
        C: Controller,
        S: RouteSink + ?Sized,
    {
        self.register(sink, instance, true)
    }

    pub fn embed<C, S>(&self, sink: &mut S, instance: impl Into<Receiver<C>>) -> RegistrationResult
    where
        C: Controller,
        S: RouteSink + ?Sized,
    {
        self.register(sink, instance, false)
    }

    /// Registers every route method of `instance` with `sink`.
    pub fn register<C, S>(
        &self,
        sink: &mut S,
        instance: impl Into<Receiver<C>>,
        prepend_prefix: bool,
    ) -> RegistrationResult
    where
        C: Controller,
        S: RouteSink + ?Sized,
    {
        let controller = C::type_name();
        let span = tracing::debug_span!("register_controller", controller, prepend_prefix);
        let _guard = span.enter();

        let result = self.register_inner(sink, instance.into(), prepend_prefix);
        if let Err(e) = &result {
            tracing::warn!(kind = e.kind(), error = %e, "Controller registration failed");
            metrics::record_registration_failure(controller, e.kind());
        }
        result
    }

    fn register_inner<C, S>(&self, sink: &mut S, instance: Receiver<C>, prepend_prefix: bool) -> RegistrationResult
    where
        C: Controller,
        S: RouteSink + ?Sized,
    {
        let controller = C::type_name();

        let receiver = match instance {
            Receiver::Shared(receiver) => receiver,
            other => {
                return Err(RegistrationError::InvalidReceiverKind {
                    controller,
                    kind: other.kind(),
                })
            }
        };

        let methods = C::methods();
        if methods.is_empty() {
            return Err(RegistrationError::NoMethodsFound { controller });
        }

        let prefix = if prepend_prefix {
            controller_prefix(controller)
        } else {
            None
        };

        let hooks = Hooks::resolve(&methods, &receiver, controller)?;
        hooks.run_init(&receiver, controller)?;

        let mut bound = 0usize;
        for (name, callable) in methods.iter() {
            let Some(binding) = decode(name) else {
                tracing::trace!(method = name, "Not a route, skipped");
                continue;
            };

            let path = compose(prefix.as_deref(), &binding.segment, self.options.append_trailing_slash);

            let action = callable
                .bind(&receiver, format!("{controller}.{name}"))
                .ok_or(RegistrationError::WrongHandlerSignature {
                    controller,
                    method: name,
                    found: callable.shape(),
                })?;

            let chain = HandlerChain::assemble(hooks.before.clone(), action, hooks.after.clone());

            let bind_result = match binding.verb {
                VerbSpec::Any => sink.any(&path, chain),
                VerbSpec::Verb(verb) => sink.handle(verb, &path, chain),
            };
            bind_result.map_err(|source| RegistrationError::Bind {
                controller,
                method: name,
                source,
            })?;

            tracing::debug!(method = name, verb = %binding.verb, path = %path, "Route bound");
            metrics::record_route_bound(controller, binding.verb);
            bound += 1;
        }

        if bound == 0 {
            tracing::warn!(methods = methods.len(), "Controller has no route methods");
        }
        tracing::info!(routes = bound, prefix = ?prefix, "Controller registered");
        Ok(())
    }
}

/// Lifecycle hooks resolved from a method table.
struct Hooks<'a, C> {
    init: Option<&'a Callable<C>>,
    before: Option<Handler>,
    after: Option<Handler>,
}

impl<'a, C: Controller> Hooks<'a, C> {
    fn resolve(methods: &'a MethodSet<C>, receiver: &Arc<C>, controller: &'static str) -> RegistrationResult<Self> {
        let wrapper = |hook: &'static str| -> RegistrationResult<Option<Handler>> {
            match methods.get(hook) {
                None => Ok(None),
                Some(callable) => callable
                    .bind(receiver, format!("{controller}.{hook}"))
                    .map(Some)
                    .ok_or(RegistrationError::WrongWrapperSignature {
                        controller,
                        hook,
                        found: callable.shape(),
                    }),
            }
        };

        let before = wrapper(BEFORE_HOOK)?;
        let after = wrapper(AFTER_HOOK)?;

        let init = methods.get(INIT_HOOK);
        if let Some(callable) = init {
            if !matches!(callable, Callable::Init(_)) {
                return Err(RegistrationError::WrongInitSignature {
                    controller,
                    found: callable.shape(),
                });
            }
        }

        Ok(Self { init, before, after })
    }

    fn run_init(&self, receiver: &C, controller: &'static str) -> RegistrationResult {
        let Some(result) = self.init.and_then(|init| init.invoke_init(receiver)) else {
            return Ok(());
        };
        result.map_err(|source| RegistrationError::InitFailed { controller, source })?;
        tracing::debug!("Init hook completed");
        Ok(())
    }
}
