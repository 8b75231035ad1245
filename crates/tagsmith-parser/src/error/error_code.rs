//! Error codes for the Tagsmith diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Syntax errors
//! - `E2xx` - Host declaration errors
//! - `E3xx` - Schema errors
//! - `W3xx` - Schema warnings

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Syntax error.
    ///
    /// The declaration tokens could not be parsed.
    E100,

    // =========================================================================
    // Host Errors (E2xx)
    // =========================================================================
    /// Invalid host type.
    ///
    /// Only struct declarations can host a markup builder.
    E200,

    /// Invalid supertype.
    ///
    /// The host struct declares a supertype; the base capability is attached
    /// by the generator and no other supertype is allowed.
    E201,

    /// Invalid constructors.
    ///
    /// The host struct declares its own constructors; the generator provides
    /// the only constructor.
    E202,

    /// Missing or invalid schema.
    ///
    /// The `schema` field has no value, or its value is not a block.
    E203,

    // =========================================================================
    // Schema Errors (E3xx)
    // =========================================================================
    /// Unsupported schema node.
    ///
    /// A schema statement is not a single call expression.
    E300,

    /// Invalid schema invocation.
    ///
    /// A schema call has an explicit receiver or a computed callee.
    E301,

    /// Duplicate generated method.
    ///
    /// A generated method name is already taken on the same type by another
    /// tag or by a method of the host.
    E302,

    // =========================================================================
    // Schema Warnings (W3xx)
    // =========================================================================
    /// Ignored option.
    ///
    /// An options entry has an unknown key, or `attributes` is not a list.
    /// Generation continues with the entry ignored.
    W300,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Syntax errors
            ErrorCode::E100 => "E100",
            // Host errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            // Schema errors
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            // Schema warnings
            ErrorCode::W300 => "W300",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Syntax errors
            ErrorCode::E100 => "syntax error",
            // Host errors
            ErrorCode::E200 => "invalid host type",
            ErrorCode::E201 => "invalid supertype",
            ErrorCode::E202 => "invalid constructors",
            ErrorCode::E203 => "missing or invalid schema",
            // Schema errors
            ErrorCode::E300 => "unsupported schema node",
            ErrorCode::E301 => "invalid schema invocation",
            ErrorCode::E302 => "duplicate generated method",
            // Schema warnings
            ErrorCode::W300 => "ignored option",
        }
    }

    /// Returns `true` for codes that abort generation of a whole declaration.
    pub fn is_host_level(&self) -> bool {
        matches!(
            self,
            ErrorCode::E100 | ErrorCode::E200 | ErrorCode::E201 | ErrorCode::E202 | ErrorCode::E203
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
