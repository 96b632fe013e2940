//! Controllers and their method tables.
//!
//! # Data Flow
//! ```text
//! impl Controller for ControllerWidget
//!     → methods() builds a MethodSet (name → Callable)
//!     → registrar looks up hooks by name, decodes the rest
//!     → Callable::bind ties a handler to the shared receiver
//!     → chain.rs assembles [Before?, action, After?]
//!     → context.rs carries one request through the chain
//! ```
//!
//! # Design Decisions
//! - Method tables are explicit; there is no runtime reflection
//! - Tables are keyed by name, so enumeration order is lexicographic
//! - Embedded controllers are promoted; the outer controller's methods win
//! - Handlers borrow the controller; state needs interior mutability

pub mod chain;
pub mod context;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub use chain::{Handler, HandlerChain, HandlerFn};
pub use context::Context;

/// Error type returned by `Init` hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shape rendered for handler callables in error messages.
pub const HANDLER_SHAPE: &str = "fn(&self, &mut Context)";
/// Shape rendered for init callables in error messages.
pub const INIT_SHAPE: &str = "fn(&self) -> Result<(), BoxError>";

type HandlerMethod<C> = Arc<dyn Fn(&C, &mut Context) + Send + Sync>;
type InitMethod<C> = Arc<dyn Fn(&C) -> Result<(), BoxError> + Send + Sync>;

/// A type whose public methods can be registered as routes.
pub trait Controller: Send + Sync + Sized + 'static {
    /// Type name used to derive the base path. Defaults to the unqualified
    /// Rust type name without generic arguments.
    fn type_name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// The controller's method table.
    fn methods() -> MethodSet<Self>;
}

fn short_type_name(full: &'static str) -> &'static str {
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics.rsplit("::").next().unwrap_or(without_generics)
}

/// A callable entry of a method table.
pub enum Callable<C> {
    /// `fn(&self, &mut Context)`: action handlers, `Before` and `After`.
    Handler(HandlerMethod<C>),
    /// `fn(&self) -> Result<(), BoxError>`: the `Init` hook.
    Init(InitMethod<C>),
    /// A public method with any other signature, described for diagnostics.
    Other(&'static str),
}

impl<C> Callable<C> {
    /// Human-readable signature of this callable.
    pub fn shape(&self) -> &'static str {
        match self {
            Callable::Handler(_) => HANDLER_SHAPE,
            Callable::Init(_) => INIT_SHAPE,
            Callable::Other(shape) => *shape,
        }
    }
}

impl<C: Send + Sync + 'static> Callable<C> {
    /// Binds a handler-shaped callable to `receiver`. Other shapes yield `None`.
    pub fn bind(&self, receiver: &Arc<C>, name: impl Into<String>) -> Option<Handler> {
        let Callable::Handler(method) = self else {
            return None;
        };
        let method = Arc::clone(method);
        let receiver = Arc::clone(receiver);
        Some(Handler::new(name, move |ctx: &mut Context| method(receiver.as_ref(), ctx)))
    }

    /// Invokes an init-shaped callable. Other shapes yield `None`.
    pub fn invoke_init(&self, receiver: &C) -> Option<Result<(), BoxError>> {
        match self {
            Callable::Init(init) => Some(init(receiver)),
            _ => None,
        }
    }

    fn project<O: 'static>(self, project: fn(&O) -> &C) -> Callable<O> {
        match self {
            Callable::Handler(f) => {
                Callable::Handler(Arc::new(move |outer: &O, ctx: &mut Context| f(project(outer), ctx)))
            }
            Callable::Init(f) => Callable::Init(Arc::new(move |outer: &O| f(project(outer)))),
            Callable::Other(shape) => Callable::Other(shape),
        }
    }
}

impl<C> Clone for Callable<C> {
    fn clone(&self) -> Self {
        match self {
            Callable::Handler(f) => Callable::Handler(Arc::clone(f)),
            Callable::Init(f) => Callable::Init(Arc::clone(f)),
            Callable::Other(shape) => Callable::Other(*shape),
        }
    }
}

impl<C> fmt::Debug for Callable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.shape())
    }
}

/// Name-keyed method table of a controller.
pub struct MethodSet<C> {
    methods: BTreeMap<&'static str, Callable<C>>,
}

impl<C: Send + Sync + 'static> MethodSet<C> {
    pub fn new() -> Self {
        Self {
            methods: BTreeMap::new(),
        }
    }

    /// Adds a `fn(&self, &mut Context)` method.
    pub fn handler<F>(mut self, name: &'static str, f: F) -> Self
    where
        F: Fn(&C, &mut Context) + Send + Sync + 'static,
    {
        self.methods.insert(name, Callable::Handler(Arc::new(f)));
        self
    }

    /// Adds a `fn(&self) -> Result<(), E>` method.
    pub fn init<F, E>(mut self, name: &'static str, f: F) -> Self
    where
        F: Fn(&C) -> Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let init = move |c: &C| f(c).map_err(Into::into);
        self.methods.insert(name, Callable::Init(Arc::new(init)));
        self
    }

    /// Declares a public method whose signature fits no known shape.
    pub fn other(mut self, name: &'static str, shape: &'static str) -> Self {
        self.methods.insert(name, Callable::Other(shape));
        self
    }

    /// Promotes the methods of an embedded controller reached through
    /// `project`. Methods already declared on `self`, or declared later,
    /// take precedence.
    pub fn promote<E: Controller>(mut self, project: fn(&C) -> &E) -> Self {
        for (name, callable) in E::methods().methods {
            self.methods
                .entry(name)
                .or_insert_with(|| callable.project(project));
        }
        self
    }
}

impl<C> MethodSet<C> {
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Callable<C>> {
        self.methods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Method names in enumeration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Callable<C>)> {
        self.methods.iter().map(|(name, callable)| (*name, callable))
    }
}

impl<C: Send + Sync + 'static> Default for MethodSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for MethodSet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.methods.iter()).finish()
    }
}

/// A controller handed to the registrar.
///
/// Only `Shared` handles can be registered: handlers and `Init` must act on
/// the same instance the caller keeps. A `Value` is rejected with
/// `InvalidReceiverKind`.
pub enum Receiver<C> {
    Shared(Arc<C>),
    Value(C),
}

impl<C> Receiver<C> {
    pub fn kind(&self) -> &'static str {
        match self {
            Receiver::Shared(_) => "shared handle",
            Receiver::Value(_) => "plain value",
        }
    }
}

impl<C> From<Arc<C>> for Receiver<C> {
    fn from(handle: Arc<C>) -> Self {
        Receiver::Shared(handle)
    }
}

impl<C> From<&Arc<C>> for Receiver<C> {
    fn from(handle: &Arc<C>) -> Self {
        Receiver::Shared(Arc::clone(handle))
    }
}

impl<C: Controller> From<C> for Receiver<C> {
    fn from(value: C) -> Self {
        Receiver::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ControllerInner {
        hits: Mutex<Vec<&'static str>>,
    }

    impl Controller for ControllerInner {
        fn methods() -> MethodSet<Self> {
            MethodSet::new()
                .handler("ActionShared", |c: &Self, _: &mut Context| {
                    c.hits.lock().unwrap().push("inner.shared")
                })
                .handler("ActionOverride", |c: &Self, _: &mut Context| {
                    c.hits.lock().unwrap().push("inner.override")
                })
        }
    }

    struct ControllerOuter {
        inner: ControllerInner,
    }

    impl ControllerOuter {
        fn inner(&self) -> &ControllerInner {
            &self.inner
        }
    }

    impl Controller for ControllerOuter {
        fn methods() -> MethodSet<Self> {
            MethodSet::new()
                .handler("ActionOverride", |c: &Self, _: &mut Context| {
                    c.inner.hits.lock().unwrap().push("outer.override")
                })
                .promote(Self::inner)
                .other("Helper", "fn(&self, usize)")
        }
    }

    #[test]
    fn test_type_name() {
        assert_eq!(ControllerOuter::type_name(), "ControllerOuter");
        assert_eq!(short_type_name("a::b::Widget<x::Y>"), "Widget");
    }

    #[test]
    fn test_enumeration_order_is_lexicographic() {
        let names: Vec<_> = ControllerOuter::methods().names().collect();
        assert_eq!(names, vec!["ActionOverride", "ActionShared", "Helper"]);
    }

    #[test]
    fn test_promotion_keeps_outer_override() {
        let outer = Arc::new(ControllerOuter {
            inner: ControllerInner { hits: Mutex::new(Vec::new()) },
        });
        let methods = ControllerOuter::methods();
        let mut ctx = Context::default();

        for name in ["ActionOverride", "ActionShared"] {
            let handler = methods.get(name).unwrap().bind(&outer, name).unwrap();
            handler.call(&mut ctx);
        }

        assert_eq!(*outer.inner.hits.lock().unwrap(), vec!["outer.override", "inner.shared"]);
    }

    #[test]
    fn test_shapes() {
        let methods = ControllerOuter::methods();
        assert_eq!(methods.get("Helper").unwrap().shape(), "fn(&self, usize)");
        assert_eq!(methods.get("ActionShared").unwrap().shape(), HANDLER_SHAPE);

        let outer = Arc::new(ControllerOuter {
            inner: ControllerInner { hits: Mutex::new(Vec::new()) },
        });
        assert!(methods.get("Helper").unwrap().bind(&outer, "Helper").is_none());
        assert!(methods.get("ActionShared").unwrap().invoke_init(&outer).is_none());
    }

    #[test]
    fn test_receiver_kinds() {
        let value = ControllerInner { hits: Mutex::new(Vec::new()) };
        assert_eq!(Receiver::from(value).kind(), "plain value");

        let shared = Arc::new(ControllerInner { hits: Mutex::new(Vec::new()) });
        assert_eq!(Receiver::from(&shared).kind(), "shared handle");
    }
}
