//! Per-selector field layouts.
//!
//! A layout lists, in calldata order, every field the decoder walks
//! through for one function. Fields that only move the cursor (dynamic
//! offsets, length prefixes, parameters not shown) are part of the
//! layout too, so adding a function means adding a table.

use ethplugin_common::{SelectorId, ADDRESS_LENGTH, PARAMETER_LENGTH, SELECTOR_SIZE};

/// ABI kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Address, right-aligned in one word.
    Address,
    /// Full 256-bit word, kept verbatim.
    Amount,
    /// Embedded 4-byte function selector.
    Method,
    /// Word that is not displayed.
    Ignored,
    /// Head word holding the offset of a dynamic parameter. Decoding jumps
    /// to that offset; `heads_after` head words follow this one.
    Offset { heads_after: u8 },
    /// Length prefix of a `bytes` payload, which must hold `min` bytes.
    Length { min: u16 },
}

impl FieldKind {
    /// Number of calldata bytes the field covers.
    pub const fn span(self) -> u16 {
        match self {
            FieldKind::Method => SELECTOR_SIZE as u16,
            _ => PARAMETER_LENGTH as u16,
        }
    }

    /// Returns true for kinds whose value is only used as a whole word.
    pub const fn is_word_valued(self) -> bool {
        matches!(self, FieldKind::Offset { .. } | FieldKind::Length { .. })
    }
}

/// Where the decoded bytes go in the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Amount,
    Primary,
    Secondary,
    Method,
    Discard,
}

/// One field of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub slot: Slot,
    /// Look the address up as a token once decoded.
    pub resolve: bool,
}

const fn field(name: &'static str, kind: FieldKind, slot: Slot) -> Field {
    Field {
        name,
        kind,
        slot,
        resolve: false,
    }
}

const fn token(name: &'static str) -> Field {
    Field {
        name,
        kind: FieldKind::Address,
        slot: Slot::Primary,
        resolve: true,
    }
}

/// Bytes of a constant flow call up to and including its third argument.
const FLOW_CALL_MIN: u16 = (SELECTOR_SIZE + 3 * PARAMETER_LENGTH) as u16;

/// `upgrade(uint256)`, `downgrade(uint256)`, `downgradeToETH(uint256)`.
const CONVERSION: &[Field] = &[field("amount", FieldKind::Amount, Slot::Amount)];

/// `callAgreement(address agreementClass, bytes callData, bytes userData)`.
///
/// Only the start of `callData` is decoded: the embedded method selector
/// and the first three words after it. For `createFlow` and `updateFlow`
/// these are token, receiver and flow rate; for `deleteFlow` they are
/// token, sender and receiver, fixed up by Finalize.
const CALL_AGREEMENT: &[Field] = &[
    field("agreementClass", FieldKind::Ignored, Slot::Discard),
    field("callData", FieldKind::Offset { heads_after: 1 }, Slot::Discard),
    field("callData.length", FieldKind::Length { min: FLOW_CALL_MIN }, Slot::Discard),
    field("method", FieldKind::Method, Slot::Method),
    token("token"),
    field("counterparty", FieldKind::Address, Slot::Secondary),
    field("flowRate", FieldKind::Amount, Slot::Amount),
];

/// `mintToken(uint256 eventId, address to)`.
const MINT_TOKEN: &[Field] = &[
    field("eventId", FieldKind::Amount, Slot::Amount),
    field("to", FieldKind::Address, Slot::Primary),
];

/// `safeTransferFrom(address from, address to, uint256 tokenId)`.
const SAFE_TRANSFER: &[Field] = &[
    field("from", FieldKind::Address, Slot::Secondary),
    field("to", FieldKind::Address, Slot::Primary),
    field("tokenId", FieldKind::Amount, Slot::Amount),
];

/// Returns the field layout of a selector, or None when the plugin does
/// not decode its parameters.
pub fn layout(id: SelectorId) -> Option<&'static [Field]> {
    match id {
        SelectorId::Upgrade | SelectorId::Downgrade | SelectorId::DowngradeToEth => {
            Some(CONVERSION)
        }
        SelectorId::UpgradeByEth => Some(&[]),
        SelectorId::CallAgreement => Some(CALL_AGREEMENT),
        SelectorId::BatchCall => None,
        SelectorId::MintToken => Some(MINT_TOKEN),
        SelectorId::SafeTransfer => Some(SAFE_TRANSFER),
    }
}

/// Returns the number of fields Finalize expects for a selector.
pub fn field_count(id: SelectorId) -> Option<u8> {
    layout(id).map(|fields| fields.len() as u8)
}

/// Number of leading zero bytes of an address word.
pub const ADDRESS_PADDING: usize = PARAMETER_LENGTH - ADDRESS_LENGTH;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans() {
        assert_eq!(FieldKind::Method.span(), 4);
        assert_eq!(FieldKind::Address.span(), 32);
        assert_eq!(FieldKind::Offset { heads_after: 0 }.span(), 32);
        assert!(FieldKind::Length { min: 0 }.is_word_valued());
        assert!(!FieldKind::Amount.is_word_valued());
    }

    #[test]
    fn test_field_counts() {
        assert_eq!(field_count(SelectorId::Upgrade), Some(1));
        assert_eq!(field_count(SelectorId::UpgradeByEth), Some(0));
        assert_eq!(field_count(SelectorId::CallAgreement), Some(7));
        assert_eq!(field_count(SelectorId::MintToken), Some(2));
        assert_eq!(field_count(SelectorId::SafeTransfer), Some(3));
        assert_eq!(field_count(SelectorId::BatchCall), None);
    }

    #[test]
    fn test_call_agreement_layout() {
        let fields = layout(SelectorId::CallAgreement).unwrap();
        assert_eq!(fields[2].kind, FieldKind::Length { min: 100 });
        assert_eq!(fields[3].slot, Slot::Method);
        assert!(fields[4].resolve);
        assert_eq!(fields.iter().filter(|f| f.resolve).count(), 1);
    }

    #[test]
    fn test_address_padding() {
        assert_eq!(ADDRESS_PADDING, 12);
    }
}
