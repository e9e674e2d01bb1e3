//! The decoding context shared with the host.
//!
//! The host reserves `CONTEXT_SIZE` bytes for each plugin call sequence
//! and hands the same record to every lifecycle call of one transaction.
//! It is the only state a plugin has, so everything decoded for display
//! and every piece of decoder progress lives here.

use crate::types::{EthAddress, SelectorId, Selector, StreamAction, Ticker, Word};
use crate::PARAMETER_LENGTH;

/// Bytes the host reserves for the plugin context.
pub const CONTEXT_SIZE: usize = 5 * PARAMETER_LENGTH;

/// Ticker was resolved (knowledge base or host).
pub const TICKER_FOUND: u8 = 1 << 0;
/// Decimal count was resolved (knowledge base or host).
pub const DECIMALS_FOUND: u8 = 1 << 1;

/// Lifecycle stage of the context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Stage {
    /// Freshly zeroed by the host, or rejected at init.
    #[default]
    Idle = 0,
    /// Selector recognized, parameters streaming in.
    Parsing = 1,
    /// All parameters decoded and checked; screens may be queried.
    Finalized = 2,
    /// Decoding failed; terminal for this transaction.
    Failed = 3,
}

/// Per-transaction plugin state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[repr(C)]
pub struct DecodingContext {
    // For display.
    /// Raw 256-bit amount (big-endian), kept verbatim for exact rendering.
    pub amount: Word,
    /// Main address: token being converted or streamed, or beneficiary.
    pub primary: EthAddress,
    /// Counterparty address: stream receiver or transfer sender.
    pub secondary: EthAddress,
    /// Selector of an embedded call found inside a `bytes` parameter.
    pub method: Selector,
    /// Resolved ticker of the primary token.
    pub ticker: Ticker,

    // For parsing data.
    /// Next expected window offset, relative to the parameter area.
    pub offset: u16,
    /// Start of the parameter currently being decoded.
    pub checkpoint: u16,
    /// Bytes still to pass before the current parameter starts.
    pub skip: u16,
    pub decimals: u8,
    pub next_param: u8,
    pub fields_found: u8,
    /// `TICKER_FOUND` | `DECIMALS_FOUND`.
    pub flags: u8,

    // For both parsing and display.
    pub stage: Stage,
    pub selector: Option<SelectorId>,
    pub action: Option<StreamAction>,
}

// The host only reserves CONTEXT_SIZE bytes. Do not remove this check.
const _: () = assert!(
    core::mem::size_of::<DecodingContext>() <= CONTEXT_SIZE,
    "DecodingContext too big"
);

impl DecodingContext {
    /// Creates a zeroed context, as handed over by the host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every field back to the zeroed state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Records the ticker and decimals of the primary token.
    pub fn set_token(&mut self, ticker: Ticker, decimals: u8) {
        self.ticker = ticker;
        self.decimals = decimals;
        self.flags |= TICKER_FOUND | DECIMALS_FOUND;
    }

    #[inline]
    pub fn has_ticker(&self) -> bool {
        self.flags & TICKER_FOUND != 0
    }

    #[inline]
    pub fn has_decimals(&self) -> bool {
        self.flags & DECIMALS_FOUND != 0
    }

    /// Decimal count to render amounts with; raw integer when unresolved.
    #[inline]
    pub fn display_decimals(&self) -> u8 {
        if self.has_decimals() {
            self.decimals
        } else {
            0
        }
    }

    /// Returns true once decoding failed for this transaction.
    #[inline]
    pub fn is_failed(&self) -> bool {
        self.stage == Stage::Failed
    }
}
