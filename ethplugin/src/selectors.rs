//! Selector tables.
//!
//! One static table per family maps the 4-byte function selector to a
//! `SelectorId`. Matching is exact and limited to the active family.

use ethplugin_common::{Selector, SelectorId};
use hex_literal::hex;

use crate::config::Family;

/// Destination policy of a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Any contract; display degrades when the knowledge base misses.
    Any,
    /// Only a contract the knowledge base registers for the family.
    Registered,
}

/// One recognized function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorEntry {
    pub selector: Selector,
    pub id: SelectorId,
    /// Operation label reported by QUERY_CONTRACT_ID.
    pub label: &'static str,
    pub destination: Destination,
}

const fn entry(
    selector: Selector,
    id: SelectorId,
    label: &'static str,
    destination: Destination,
) -> SelectorEntry {
    SelectorEntry {
        selector,
        id,
        label,
        destination,
    }
}

/// Superfluid super tokens and host.
pub const RICOCHET_SELECTORS: [SelectorEntry; 6] = [
    // downgrade(uint256)
    entry(hex!("11bcc81e"), SelectorId::Downgrade, "Downgrade", Destination::Any),
    // downgradeToETH(uint256)
    entry(hex!("160e8be3"), SelectorId::DowngradeToEth, "Downgrade ETH", Destination::Any),
    // callAgreement(address,bytes,bytes)
    entry(hex!("39255d5b"), SelectorId::CallAgreement, "Call Agreement", Destination::Registered),
    // upgrade(uint256)
    entry(hex!("45977d03"), SelectorId::Upgrade, "Upgrade", Destination::Any),
    // upgradeByETH()
    entry(hex!("cf81464b"), SelectorId::UpgradeByEth, "Upgrade ETH", Destination::Any),
    // batchCall((uint32,address,bytes)[])
    entry(hex!("6ad3ca7d"), SelectorId::BatchCall, "Batch Call", Destination::Registered),
];

/// POAP badges.
pub const POAP_SELECTORS: [SelectorEntry; 2] = [
    // mintToken(uint256,address)
    entry(hex!("a140ae23"), SelectorId::MintToken, "Mint", Destination::Registered),
    // safeTransferFrom(address,address,uint256)
    entry(hex!("42842e0e"), SelectorId::SafeTransfer, "Safe Transfer", Destination::Registered),
];

/// Returns the selector table of a family.
pub fn table(family: Family) -> &'static [SelectorEntry] {
    match family {
        Family::Ricochet => &RICOCHET_SELECTORS,
        Family::Poap => &POAP_SELECTORS,
    }
}

/// Looks a selector up in the family table.
pub fn classify(family: Family, selector: &Selector) -> Option<&'static SelectorEntry> {
    table(family).iter().find(|e| &e.selector == selector)
}

/// Returns the table entry of a recognized selector.
pub fn entry_for(family: Family, id: SelectorId) -> Option<&'static SelectorEntry> {
    table(family).iter().find(|e| e.id == id)
}
