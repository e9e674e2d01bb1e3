//! Contract plugins for the Ethereum app.
//!
//! A plugin turns the calldata of a call to a known contract into a short
//! list of review screens. The host streams the call in 32-byte windows;
//! the plugin keeps its whole state in the host-provided
//! [`DecodingContext`](ethplugin_common::DecodingContext) and never
//! allocates.
//!
//! Two families are supported:
//! - Ricochet: Superfluid super token upgrades and downgrades, and
//!   constant flow streams into Ricochet exchanges
//! - POAP: badge minting and transfers
//!
//! # Security Model
//!
//! - The host is untrusted: every selector, offset and length is checked
//! - Unknown selectors and destinations fail closed
//! - Unknown tokens degrade the display to raw addresses and integers
//! - Any decode error is terminal for the transaction

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod decoder;
pub mod handlers;
pub mod knowledge;
pub mod layout;
pub mod plugin;
pub mod screens;
pub mod selectors;
pub mod utils;

pub use config::{Family, PluginConfig};
pub use knowledge::{KnowledgeBase, StaticKnowledge};
pub use plugin::Plugin;
