//! PROVIDE_PARAMETER handler.

use ethplugin_common::{PluginError, PluginResult, ProvideParameter, Stage};

use super::{fail_on_decode_error, require_stage};
use crate::decoder::decode_window;
use crate::knowledge::KnowledgeBase;

/// Handles PROVIDE_PARAMETER.
///
/// The window is decoded against a copy of the context, which replaces
/// the shared one only when the whole window was accepted. A decode error
/// leaves the decoded fields as they were and fails the transaction.
pub fn handle_provide_parameter<K: KnowledgeBase + ?Sized>(
    kb: &K,
    msg: &mut ProvideParameter<'_>,
) -> Result<PluginResult, PluginError> {
    let ctx = &mut *msg.context;
    require_stage(ctx, &[Stage::Parsing])?;

    match decode_window(ctx, kb, &msg.parameter, msg.offset) {
        Ok(next) => {
            *ctx = next;
            Ok(PluginResult::Ok)
        }
        Err(e) => Err(fail_on_decode_error(ctx, e)),
    }
}
