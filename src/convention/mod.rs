//! Naming conventions that turn method names into routes.
//!
//! # Data Flow
//! ```text
//! Method name ("GetThing", "ActionKnown", "Post")
//!     → decoder.rs (verb or ANY + raw remainder)
//!     → case.rs (remainder → kebab-case segment)
//!     → path.rs (controller prefix + segment + trailing-slash policy)
//!     → Route path ("/widget/thing")
//! ```
//!
//! # Design Decisions
//! - Everything here is a pure function of its inputs
//! - Verb prefixes are matched case-insensitively and textually ("Getter" is GET + "ter")
//! - The action marker is matched case-sensitively

pub mod case;
pub mod decoder;
pub mod path;
pub mod verb;

pub use case::kebab_case;
pub use decoder::{decode, MethodBinding, ACTION_MARKER};
pub use path::{compose, controller_prefix, CONTROLLER_PREFIX};
pub use verb::{Verb, VerbSpec};
