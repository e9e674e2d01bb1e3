//! QUERY_CONTRACT_ID handler.

use ethplugin_common::{PluginError, PluginResult, QueryContractId};
use zeroize::Zeroize;

use crate::config::PluginConfig;
use crate::knowledge::KnowledgeBase;
use crate::selectors::entry_for;

/// Handles QUERY_CONTRACT_ID.
///
/// The label is the selector's, or the stream action once Finalize
/// resolved it. A context without a recognized selector is an error, so
/// a rejected call never reports the label of an earlier one.
pub fn handle_query_contract_id<K: KnowledgeBase + ?Sized>(
    config: &PluginConfig,
    kb: &K,
    msg: &mut QueryContractId<'_>,
) -> Result<PluginResult, PluginError> {
    msg.name.zeroize();
    msg.label.zeroize();

    let ctx = msg.context;
    if ctx.is_failed() {
        return Err(PluginError::InvalidState);
    }
    let id = ctx.selector.ok_or(PluginError::Unsupported)?;
    let entry = entry_for(config.family, id).ok_or(PluginError::Unsupported)?;

    let label = match ctx.action {
        Some(_) => kb
            .stream_method(&ctx.method)
            .map_or(entry.label, |method| method.label),
        None => entry.label,
    };

    msg.name
        .push_str(config.family.plugin_name())
        .and_then(|_| msg.label.push_str(label))
        .map_err(|_| PluginError::Display)?;
    Ok(PluginResult::Ok)
}
