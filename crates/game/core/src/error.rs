//! Common error infrastructure for keeper-core.
//!
//! Domain-specific errors (`CastError`, `OracleError`, `CatalogError`) live
//! beside the code that raises them and share the classification below.

/// Severity level of an error, used for categorization and logging.
///
/// - **Recoverable**: the caster may succeed later (more gold, cooldown over)
/// - **Validation**: the request itself is wrong for the current state
/// - **Internal**: the engine was handed inconsistent data; logged as an error
/// - **Fatal**: a required collaborator is missing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry may succeed once world state changes.
    ///
    /// Examples: insufficient funds, no free entity slot
    Recoverable,

    /// Validation error - invalid request, should not retry unchanged.
    ///
    /// Examples: power unavailable, target out of the targeting matrix
    Validation,

    /// Internal error - unexpected routing or state inconsistency.
    ///
    /// Examples: power routed to the wrong entry point, non-creature handed
    /// to a creature-only handler
    Internal,

    /// Fatal error - the engine cannot proceed without a collaborator.
    ///
    /// Examples: missing power catalog or terrain oracle
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all keeper-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable strings, safe to compare in logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
