//! Plugin configuration.
//!
//! A plugin instance serves one contract family. The family decides the
//! plugin name the host displays, the selector table and which registered
//! contracts are accepted as destinations.

/// Contract family served by a plugin instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Superfluid super tokens and Ricochet exchange streams.
    Ricochet,
    /// POAP badges.
    Poap,
}

impl Family {
    /// Name reported to the host by QUERY_CONTRACT_ID.
    pub const fn plugin_name(self) -> &'static str {
        match self {
            Family::Ricochet => "Ricochet",
            Family::Poap => "Poap",
        }
    }
}

/// Plugin configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginConfig {
    /// Contract family.
    pub family: Family,
    /// Whether PROVIDE_INFO metadata may fill in tokens the knowledge
    /// base does not know.
    pub accept_host_metadata: bool,
}

impl PluginConfig {
    pub const fn new(family: Family) -> Self {
        Self {
            family,
            accept_host_metadata: !cfg!(feature = "strict-metadata"),
        }
    }

    pub const fn ricochet() -> Self {
        Self::new(Family::Ricochet)
    }

    pub const fn poap() -> Self {
        Self::new(Family::Poap)
    }
}
