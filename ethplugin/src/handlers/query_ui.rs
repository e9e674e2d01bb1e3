//! QUERY_CONTRACT_UI handler.

use ethplugin_common::{PluginError, PluginResult, QueryContractUi, Stage};
use zeroize::Zeroize;

use super::require_stage;
use crate::knowledge::KnowledgeBase;
use crate::screens::render;

/// Handles QUERY_CONTRACT_UI.
///
/// Title and body are cleared before rendering and again on failure, so
/// the host never reads a partial screen.
pub fn handle_query_contract_ui<K: KnowledgeBase + ?Sized>(
    kb: &K,
    msg: &mut QueryContractUi<'_>,
) -> Result<PluginResult, PluginError> {
    msg.title.zeroize();
    msg.body.zeroize();
    require_stage(msg.context, &[Stage::Finalized])?;

    render(msg.context, kb, msg.screen_index, &mut msg.title, &mut msg.body).inspect_err(|_| {
        msg.title.zeroize();
        msg.body.zeroize();
    })
}
