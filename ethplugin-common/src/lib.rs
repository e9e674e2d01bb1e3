//! Common types for Ethereum app contract plugins.
//!
//! This crate provides the types shared by the Ethereum app (the host)
//! and the plugins it calls into: the fixed-size decoding context,
//! lifecycle message payloads, message codes and the error taxonomy.
//!
//! # Security Note
//!
//! The decoding context is shared by reference with the host. Nothing
//! in it is trusted on entry: plugins re-validate every field they read
//! back from a previous call.

#![cfg_attr(not(test), no_std)]

pub mod context;
pub mod error;
pub mod message;
pub mod opcodes;
pub mod types;

pub use context::{DecodingContext, Stage, CONTEXT_SIZE};
pub use error::PluginError;
pub use message::*;
pub use opcodes::{PluginOp, PluginResult};
pub use types::*;

/// Length of a function selector, in bytes.
pub const SELECTOR_SIZE: usize = 4;

/// Length of one ABI word, which is also the size of a calldata window.
pub const PARAMETER_LENGTH: usize = 32;

/// Length of an Ethereum address, in bytes.
pub const ADDRESS_LENGTH: usize = 20;
