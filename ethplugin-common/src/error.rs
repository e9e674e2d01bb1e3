//! Error types for contract plugins.
//!
//! Errors never cross the host boundary as values: the dispatcher turns
//! each of them into `PluginResult::Error`. The codes exist for logging
//! and tests, and messages are kept terse.

use core::fmt;
use num_derive::{FromPrimitive, ToPrimitive};

/// Error codes for contract plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u8)]
pub enum PluginError {
    /// Selector or destination not supported by this plugin.
    Unsupported = 0x01,

    /// Recognized selector without a field layout.
    NoLayout = 0x02,

    /// Calldata window arrived behind the expected offset.
    Rewind = 0x03,

    /// Calldata window skipped bytes of the parameter being decoded.
    Gap = 0x04,

    /// Word-valued parameter straddles two windows.
    Misaligned = 0x05,

    /// Offset or length outside the supported range.
    OutOfRange = 0x06,

    /// Value with non-zero padding or out-of-range sign extension.
    NonCanonical = 0x07,

    /// Embedded method selector not recognized.
    UnknownMethod = 0x08,

    /// Finalize called before every field was decoded.
    Incomplete = 0x09,

    /// Lifecycle call not valid in the current stage.
    InvalidState = 0x0A,

    /// Malformed message payload.
    InvalidParameter = 0x0B,

    /// Screen text does not fit the reply buffer.
    Display = 0x0C,
}

impl PluginError {
    /// Returns the error code as a u8.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns true if this error ends decoding for the transaction.
    #[inline]
    pub fn is_decode_error(self) -> bool {
        matches!(
            self,
            PluginError::NoLayout
                | PluginError::Rewind
                | PluginError::Gap
                | PluginError::Misaligned
                | PluginError::OutOfRange
                | PluginError::NonCanonical
                | PluginError::UnknownMethod
        )
    }
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginError::Unsupported => write!(f, "Unsupported call"),
            PluginError::NoLayout => write!(f, "No layout"),
            PluginError::Rewind => write!(f, "Offset went backward"),
            PluginError::Gap => write!(f, "Missing parameter bytes"),
            PluginError::Misaligned => write!(f, "Misaligned parameter"),
            PluginError::OutOfRange => write!(f, "Offset out of range"),
            PluginError::NonCanonical => write!(f, "Non-canonical value"),
            PluginError::UnknownMethod => write!(f, "Unknown method"),
            PluginError::Incomplete => write!(f, "Incomplete parameters"),
            PluginError::InvalidState => write!(f, "Invalid state"),
            PluginError::InvalidParameter => write!(f, "Invalid parameter"),
            PluginError::Display => write!(f, "Display overflow"),
        }
    }
}
