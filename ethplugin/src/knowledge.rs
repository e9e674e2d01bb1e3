//! Display knowledge base.
//!
//! Static tables that turn addresses and embedded selectors into
//! something a user can read: token tickers and decimals, Ricochet
//! exchange pairs, stream lifecycle labels and the contracts each family
//! accepts as a destination.
//!
//! Lookups are exact matches. A miss is never an error here; callers
//! decide whether to fall back to a raw rendering or to reject the call.

use ethplugin_common::{EthAddress, Selector, StreamAction};
use hex_literal::hex;

use crate::config::Family;

/// Token known to the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenEntry {
    pub address: EthAddress,
    pub ticker: &'static str,
    /// Ticker of the wrapped asset, for super tokens.
    pub underlying: Option<&'static str>,
    pub decimals: u8,
}

/// Ricochet exchange, identified by the stream receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairEntry {
    pub address: EthAddress,
    /// Super token streamed into the exchange.
    pub sent: &'static str,
    /// Super token streamed back.
    pub received: &'static str,
}

/// Constant flow agreement method embedded in `callAgreement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamMethod {
    pub selector: Selector,
    pub label: &'static str,
    pub action: StreamAction,
}

/// Contract accepted as a destination for a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractEntry {
    pub address: EthAddress,
    pub family: Family,
    pub name: &'static str,
}

/// Read-only lookup service used by the decoder and screen composer.
pub trait KnowledgeBase {
    /// Token metadata by contract address.
    fn token(&self, address: &EthAddress) -> Option<&TokenEntry>;

    /// Exchange pair by exchange address.
    fn pair(&self, address: &EthAddress) -> Option<&PairEntry>;

    /// Stream method by embedded selector.
    fn stream_method(&self, selector: &Selector) -> Option<&StreamMethod>;

    /// Registered destination contract by address.
    fn contract(&self, address: &EthAddress) -> Option<&ContractEntry>;

    /// Returns true if `address` is registered for `family`.
    fn is_registered(&self, family: Family, address: &EthAddress) -> bool {
        self.contract(address).is_some_and(|c| c.family == family)
    }
}

// =============================================================================
// Built-in tables
// =============================================================================

const fn super_token(
    address: EthAddress,
    underlying: &'static str,
    ticker: &'static str,
) -> TokenEntry {
    TokenEntry {
        address,
        ticker,
        underlying: Some(underlying),
        decimals: 18,
    }
}

const fn pair(address: EthAddress, sent: &'static str, received: &'static str) -> PairEntry {
    PairEntry {
        address,
        sent,
        received,
    }
}

/// POAP contract (mainnet and Gnosis Chain share the address).
pub const POAP_ADDRESS: EthAddress = hex!("22c1f6050e56d2876009903609a2cc3fef83b415");

/// Superfluid host on Polygon.
pub const SUPERFLUID_HOST_ADDRESS: EthAddress = hex!("3e14dc1b13c488a8d5d310918780c983bd5982e7");

/// Super tokens on Polygon, plus the POAP collection.
pub const TOKENS: [TokenEntry; 9] = [
    super_token(hex!("1305f6b6df9dc47159d12eb7ac2804d4a33173c2"), "DAI", "DAIx"),
    super_token(hex!("caa7349cea390f89641fe306d93591f87595dc1f"), "USDC", "USDCx"),
    super_token(hex!("27e1e4e6bc79d93032abef01025811b7e4727e85"), "WETH", "ETHx"),
    super_token(hex!("2c530af1f088b836fa0dca23c7ea50e669508c4c"), "MKR", "MKRx"),
    super_token(hex!("dab943c03f9e84795dc7bf51ddc71daf0033382b"), "SUSHI", "SUSHIx"),
    super_token(hex!("b63e38d21b31719e6df314d3d2c351df0d4a9162"), "IDLE", "IDLEx"),
    super_token(hex!("4086ebf75233e8492f1bcda41c7f2a8288c2fb92"), "WBTC", "WBTCx"),
    super_token(hex!("3ad736904e9e65189c3000c7dd2c8ac8bb7cd4e3"), "MATIC", "MATICx"),
    TokenEntry {
        address: POAP_ADDRESS,
        ticker: "POAP",
        underlying: None,
        decimals: 0,
    },
];

/// Ricochet exchanges on Polygon.
pub const PAIRS: [PairEntry; 15] = [
    pair(hex!("9bef427fa1ff5269b824eed9415f7622b81244f5"), "DAIx", "ETHx"),
    pair(hex!("0a70fbb45bc8c70fb94d8678b92686bb69dea3c3"), "ETHx", "DAIx"),
    pair(hex!("e0a0ec8dee2f73943a6b731a2e11484916f45d44"), "USDCx", "WBTCx"),
    pair(hex!("71f649eb05aa48cf8d92328d1c486b7d9fdbff6b"), "WBTCx", "USDCx"),
    pair(hex!("8082ab2f4e220dad92689f3682f3e7a42b206b42"), "USDCx", "ETHx"),
    pair(hex!("3941e2e89f7047e0ac7b9cce18fbe90927a32100"), "ETHx", "USDCx"),
    pair(hex!("e093d8a4269ce5c91cd9389a0646badab2c8d9a3"), "USDCx", "MATICx"),
    pair(hex!("93d2d0812c9856141b080e9ef6e97c7a7b342d7f"), "MATICx", "USDCx"),
    pair(hex!("a152715df800db5926598917a6ef3702308bcb7e"), "DAIx", "MATICx"),
    pair(hex!("250efbb94de68dd165bd6c98e804e08153eb91c6"), "MATICx", "DAIx"),
    pair(hex!("c89583fa7b84d81fe54c1339ce3feb10de8b4c96"), "USDCx", "MKRx"),
    pair(hex!("dc19ed26ad3a544e729b72b50b518a231cbad9ab"), "MKRx", "USDCx"),
    pair(hex!("47de4fd666373ca4a793e2e0e7f995ea7d3c9a29"), "DAIx", "MKRx"),
    pair(hex!("94e5b18309066dd1e5ae97628afc9d4d7eb58161"), "MKRx", "DAIx"),
    pair(hex!("be79a6fd39a8e8b0ff7e1af1ea6e264699680584"), "USDCx", "IDLEx"),
];

/// Constant flow agreement methods.
pub const STREAM_METHODS: [StreamMethod; 3] = [
    // createFlow(address,address,int96,bytes)
    StreamMethod {
        selector: hex!("62fc305e"),
        label: "Start Stream",
        action: StreamAction::Start,
    },
    // updateFlow(address,address,int96,bytes)
    StreamMethod {
        selector: hex!("50209a62"),
        label: "Update Stream",
        action: StreamAction::Update,
    },
    // deleteFlow(address,address,address,bytes)
    StreamMethod {
        selector: hex!("b4b333c6"),
        label: "Stop Stream",
        action: StreamAction::Stop,
    },
];

/// Destinations accepted for selectors that require a registered contract.
pub const CONTRACTS: [ContractEntry; 2] = [
    ContractEntry {
        address: SUPERFLUID_HOST_ADDRESS,
        family: Family::Ricochet,
        name: "Superfluid Host",
    },
    ContractEntry {
        address: POAP_ADDRESS,
        family: Family::Poap,
        name: "POAP",
    },
];

/// Knowledge base backed by static tables.
#[derive(Debug, Clone, Copy)]
pub struct StaticKnowledge {
    tokens: &'static [TokenEntry],
    pairs: &'static [PairEntry],
    methods: &'static [StreamMethod],
    contracts: &'static [ContractEntry],
}

impl StaticKnowledge {
    /// Knowledge base with the built-in tables.
    pub const fn new() -> Self {
        Self::with_tables(&TOKENS, &PAIRS, &STREAM_METHODS, &CONTRACTS)
    }

    /// Knowledge base with substitute tables.
    pub const fn with_tables(
        tokens: &'static [TokenEntry],
        pairs: &'static [PairEntry],
        methods: &'static [StreamMethod],
        contracts: &'static [ContractEntry],
    ) -> Self {
        Self {
            tokens,
            pairs,
            methods,
            contracts,
        }
    }
}

impl Default for StaticKnowledge {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeBase for StaticKnowledge {
    fn token(&self, address: &EthAddress) -> Option<&TokenEntry> {
        self.tokens.iter().find(|t| &t.address == address)
    }

    fn pair(&self, address: &EthAddress) -> Option<&PairEntry> {
        self.pairs.iter().find(|p| &p.address == address)
    }

    fn stream_method(&self, selector: &Selector) -> Option<&StreamMethod> {
        self.methods.iter().find(|m| &m.selector == selector)
    }

    fn contract(&self, address: &EthAddress) -> Option<&ContractEntry> {
        self.contracts.iter().find(|c| &c.address == address)
    }
}
