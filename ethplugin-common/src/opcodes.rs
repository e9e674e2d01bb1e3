//! Lifecycle message codes and result codes.
//!
//! The host calls a plugin with a raw message code and a payload. Codes
//! are kept numerically compatible with the Ethereum app plugin SDK.

use num_derive::{FromPrimitive, ToPrimitive};

/// Lifecycle messages sent by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum PluginOp {
    /// Classify the destination and selector, reset the context.
    /// Input: InitContract.
    InitContract = 0x0101,

    /// Feed one 32-byte calldata window.
    /// Input: ProvideParameter.
    ProvideParameter = 0x0102,

    /// All windows were sent; run post-decode checks.
    /// Input: Finalize. Returns: screen count and optional token lookup.
    Finalize = 0x0103,

    /// Token metadata resolved by the host.
    /// Input: ProvideInfo.
    ProvideInfo = 0x0104,

    /// Plugin name and operation label.
    /// Returns: QueryContractId.
    QueryContractId = 0x0105,

    /// One review screen by index.
    /// Returns: QueryContractUi.
    QueryContractUi = 0x0106,

    /// Host asks whether the plugin is installed.
    /// Answered without entering dispatch.
    CheckPresence = 0x01FF,
}

/// Result written back into every message payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u8)]
pub enum PluginResult {
    /// Message not handled (initial value).
    #[default]
    Unavailable = 0x00,
    /// Message handled and rejected.
    Error = 0x01,
    /// Message handled successfully.
    Ok = 0x02,
    /// Screen index past the last screen; end of sequence.
    NoMoreScreens = 0x03,
}
