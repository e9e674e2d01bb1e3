//! INIT_CONTRACT handler.

use ethplugin_common::{InitContract, PluginError, PluginResult, SelectorId, Stage};

use crate::config::PluginConfig;
use crate::decoder::resolve_token;
use crate::knowledge::KnowledgeBase;
use crate::selectors::{classify, Destination};

/// Handles INIT_CONTRACT.
///
/// Always starts from a zeroed context, so nothing decoded for a previous
/// transaction survives a rejected call.
///
/// # Returns
/// - `PluginResult::Ok` once the selector is recognized
/// - `PluginError::Unsupported` for an unknown selector or destination
pub fn handle_init_contract<K: KnowledgeBase + ?Sized>(
    config: &PluginConfig,
    kb: &K,
    msg: &mut InitContract<'_>,
) -> Result<PluginResult, PluginError> {
    let ctx = &mut *msg.context;
    ctx.reset();

    let Some(entry) = classify(config.family, &msg.selector) else {
        log::warn!("unsupported selector {:02x?}", msg.selector);
        ctx.stage = Stage::Failed;
        return Err(PluginError::Unsupported);
    };

    if entry.destination == Destination::Registered
        && !kb.is_registered(config.family, &msg.destination)
    {
        log::warn!("{} sent to unregistered contract", entry.label);
        ctx.stage = Stage::Failed;
        return Err(PluginError::Unsupported);
    }

    ctx.selector = Some(entry.id);
    ctx.stage = Stage::Parsing;

    match entry.id {
        id if id.is_conversion() => {
            ctx.primary = msg.destination;
            resolve_token(ctx, kb, &msg.destination);
            if id == SelectorId::UpgradeByEth {
                ctx.amount = msg.value;
            }
        }
        SelectorId::MintToken | SelectorId::SafeTransfer => {
            resolve_token(ctx, kb, &msg.destination);
        }
        _ => {}
    }

    let plugin = config.family.plugin_name();
    match kb.contract(&msg.destination) {
        Some(contract) => log::info!("{}: {} on {}", plugin, entry.label, contract.name),
        None => log::info!("{}: {}", plugin, entry.label),
    }
    Ok(PluginResult::Ok)
}
