//! Registration error definitions.

use thiserror::Error;

use crate::controller::BoxError;
use crate::routing::sink::BindError;

/// Errors returned by controller registration.
///
/// Every variant names the controller type; bindings made before the error
/// stay registered.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The controller was passed by value instead of as a shared handle.
    #[error("controller {controller}: wrong instance kind ({kind}), pass an Arc handle")]
    InvalidReceiverKind { controller: &'static str, kind: &'static str },

    /// The method table is empty.
    #[error("controller {controller}: methods not found")]
    NoMethodsFound { controller: &'static str },

    /// The `Init` hook returned an error.
    #[error("controller {controller}: init failed: {source}")]
    InitFailed {
        controller: &'static str,
        #[source]
        source: BoxError,
    },

    /// `Init` exists but is not `fn(&self) -> Result<(), E>`.
    #[error("controller {controller}: Init has wrong signature {found}")]
    WrongInitSignature { controller: &'static str, found: &'static str },

    /// `Before` or `After` exists but is not handler-shaped.
    #[error("controller {controller}: {hook} wrapper has wrong signature {found}")]
    WrongWrapperSignature {
        controller: &'static str,
        hook: &'static str,
        found: &'static str,
    },

    /// A method decodes to a route but is not handler-shaped.
    #[error("controller {controller}: action method {method} has wrong signature {found}")]
    WrongHandlerSignature {
        controller: &'static str,
        method: &'static str,
        found: &'static str,
    },

    /// The router refused a binding.
    #[error("controller {controller}: cannot bind {method}: {source}")]
    Bind {
        controller: &'static str,
        method: &'static str,
        #[source]
        source: BindError,
    },
}

impl RegistrationError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RegistrationError::InvalidReceiverKind { .. } => "invalid_receiver_kind",
            RegistrationError::NoMethodsFound { .. } => "no_methods_found",
            RegistrationError::InitFailed { .. } => "init_failed",
            RegistrationError::WrongInitSignature { .. } => "wrong_init_signature",
            RegistrationError::WrongWrapperSignature { .. } => "wrong_wrapper_signature",
            RegistrationError::WrongHandlerSignature { .. } => "wrong_handler_signature",
            RegistrationError::Bind { .. } => "bind",
        }
    }

    /// Controller the error belongs to.
    pub fn controller(&self) -> &'static str {
        match self {
            RegistrationError::InvalidReceiverKind { controller, .. }
            | RegistrationError::NoMethodsFound { controller }
            | RegistrationError::InitFailed { controller, .. }
            | RegistrationError::WrongInitSignature { controller, .. }
            | RegistrationError::WrongWrapperSignature { controller, .. }
            | RegistrationError::WrongHandlerSignature { controller, .. }
            | RegistrationError::Bind { controller, .. } => *controller,
        }
    }
}

/// Result type for registration.
pub type RegistrationResult<T = ()> = Result<T, RegistrationError>;
