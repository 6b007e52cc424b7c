//! Error handling for NozzleCal
//!
//! Every failure of the generation engine is reported through
//! [`GenerationError`]. Errors are raised before any command of the failing
//! call reaches the command stream.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Generation error type
///
/// Represents failures while resolving tools, parsing pattern directions,
/// or validating the printer/pattern configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// A requested tool identifier is not in the configured tool list
    #[error("Unknown tool {tool}: not present in the configured tool list")]
    UnknownTool {
        /// The requested tool identifier.
        tool: u32,
    },

    /// A direction or axis string is not one of the accepted values
    #[error("Invalid direction '{value}' (expected one of {expected})")]
    InvalidDirection {
        /// The rejected input.
        value: String,
        /// The accepted spellings.
        expected: &'static str,
    },

    /// An extruding primitive was called before any tool change
    #[error("No active tool: select a tool before extruding")]
    NoActiveTool,

    /// The printer or pattern configuration is unusable
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl GenerationError {
    /// Create a configuration error from a message
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        GenerationError::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Check if this is an unknown tool error
    pub fn is_unknown_tool(&self) -> bool {
        matches!(self, GenerationError::UnknownTool { .. })
    }

    /// Check if this is an invalid direction error
    pub fn is_invalid_direction(&self) -> bool {
        matches!(self, GenerationError::InvalidDirection { .. })
    }
}

/// Result type alias for NozzleCal generation
pub type Result<T> = std::result::Result<T, GenerationError>;
