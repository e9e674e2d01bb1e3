//! Core types for contract plugins.
//!
//! Every type here has a fixed size known at compile time. Strings are
//! stored inline in `FixedStr` buffers so that neither the host nor the
//! plugin ever allocates.

use core::fmt;
use zeroize::Zeroize;

/// Ethereum address (20 bytes).
pub type EthAddress = [u8; 20];

/// Function selector (4 bytes).
pub type Selector = [u8; 4];

/// One ABI word (32 bytes, big-endian).
pub type Word = [u8; 32];

/// Maximum ticker length, in bytes.
pub const MAX_TICKER_LEN: usize = 11;

/// Capacity of a screen title.
pub const TITLE_LEN: usize = 32;

/// Capacity of a screen body.
pub const BODY_LEN: usize = 96;

/// Capacity of the plugin name and operation label.
pub const LABEL_LEN: usize = 32;

/// Token ticker stored in the decoding context.
pub type Ticker = FixedStr<MAX_TICKER_LEN>;

/// Screen title buffer.
pub type Title = FixedStr<TITLE_LEN>;

/// Screen body buffer.
pub type Body = FixedStr<BODY_LEN>;

/// Plugin name or operation label buffer.
pub type Label = FixedStr<LABEL_LEN>;

// =============================================================================
// Fixed-capacity string
// =============================================================================

/// Inline UTF-8 string of at most `N` bytes.
///
/// Writes that do not fit fail as a whole; the buffer never holds a
/// truncated string.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FixedStr<const N: usize> {
    bytes: [u8; N],
    len: u8,
}

impl<const N: usize> FixedStr<N> {
    const CAPACITY_FITS: () = assert!(N <= u8::MAX as usize, "FixedStr capacity too large");

    /// Creates an empty string.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_FITS;
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    /// Copies `s` into a new buffer, or returns None if it does not fit.
    pub fn try_from_str(s: &str) -> Option<Self> {
        let mut out = Self::new();
        out.push_str(s).ok()?;
        Some(out)
    }

    /// Returns the string contents.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or("")
    }

    /// Returns the length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true if the string is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capacity in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Appends `s`, leaving the buffer untouched if it does not fit.
    pub fn push_str(&mut self, s: &str) -> Result<(), fmt::Error> {
        let start = self.len as usize;
        let end = start.checked_add(s.len()).ok_or(fmt::Error)?;
        if end > N {
            return Err(fmt::Error);
        }
        self.bytes[start..end].copy_from_slice(s.as_bytes());
        self.len = end as u8;
        Ok(())
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Zeroize for FixedStr<N> {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
        self.len.zeroize();
    }
}

impl<const N: usize> fmt::Write for FixedStr<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s)
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Recognized operations
// =============================================================================

/// Identifier of a recognized function, across all plugin families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SelectorId {
    /// `downgrade(uint256)`
    Downgrade = 1,
    /// `downgradeToETH(uint256)`
    DowngradeToEth = 2,
    /// `callAgreement(address,bytes,bytes)`
    CallAgreement = 3,
    /// `upgrade(uint256)`
    Upgrade = 4,
    /// `upgradeByETH()`
    UpgradeByEth = 5,
    /// `batchCall(...)`
    BatchCall = 6,
    /// `mintToken(uint256,address)`
    MintToken = 7,
    /// `safeTransferFrom(address,address,uint256)`
    SafeTransfer = 8,
}

impl SelectorId {
    /// Returns true for the super-token wrap and unwrap calls.
    #[inline]
    pub fn is_conversion(self) -> bool {
        matches!(
            self,
            SelectorId::Upgrade
                | SelectorId::UpgradeByEth
                | SelectorId::Downgrade
                | SelectorId::DowngradeToEth
        )
    }

    /// Returns true when the call wraps an underlying asset into a super token.
    #[inline]
    pub fn is_upgrade(self) -> bool {
        matches!(self, SelectorId::Upgrade | SelectorId::UpgradeByEth)
    }
}

/// Lifecycle action of a Superfluid constant flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StreamAction {
    Start = 1,
    Update = 2,
    Stop = 3,
}

// =============================================================================
// Host metadata
// =============================================================================

/// Token metadata resolved by the host from its own registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Zeroize)]
pub struct TokenInfo {
    /// Token contract address.
    pub address: EthAddress,
    /// Display ticker.
    pub ticker: Ticker,
    /// Decimal places.
    pub decimals: u8,
}
