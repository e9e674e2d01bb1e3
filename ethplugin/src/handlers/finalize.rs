//! FINALIZE handler.

use ethplugin_common::{
    DecodingContext, Finalize, PluginError, PluginResult, SelectorId, Stage, StreamAction,
    ADDRESS_LENGTH,
};

use super::{fail_on_decode_error, require_stage};
use crate::knowledge::KnowledgeBase;
use crate::layout::{field_count, ADDRESS_PADDING};
use crate::screens::{screen_count, shows_token};

/// Bytes of an `int96` flow rate within its word.
const INT96_LENGTH: usize = 12;

/// Handles FINALIZE.
///
/// Runs the checks that need every parameter, then freezes the context
/// for the screen queries.
///
/// # Returns
/// - `PluginResult::Ok` with the screen count, plus the token the host
///   should look up when the plugin could not name it
/// - `PluginError::Incomplete` if a field is missing; the context is left
///   as it was, so the call may be repeated
pub fn handle_finalize<K: KnowledgeBase + ?Sized>(
    kb: &K,
    msg: &mut Finalize<'_>,
) -> Result<PluginResult, PluginError> {
    let ctx = &mut *msg.context;
    require_stage(ctx, &[Stage::Parsing])?;
    let id = ctx.selector.ok_or(PluginError::InvalidState)?;

    let expected = match field_count(id) {
        Some(count) => count,
        None => return Err(fail_on_decode_error(ctx, PluginError::NoLayout)),
    };
    if ctx.fields_found != expected {
        log::debug!("finalize with {} of {} fields", ctx.fields_found, expected);
        return Err(PluginError::Incomplete);
    }

    if id == SelectorId::CallAgreement {
        resolve_stream(ctx, kb).map_err(|e| fail_on_decode_error(ctx, e))?;
    }

    ctx.stage = Stage::Finalized;
    msg.screen_count = screen_count(id);
    if shows_token(id) && !ctx.has_ticker() {
        msg.token_lookup = Some(ctx.primary);
    }
    Ok(PluginResult::Ok)
}

/// Decides which flow method `callAgreement` carries and normalizes the
/// decoded words for it.
fn resolve_stream<K: KnowledgeBase + ?Sized>(
    ctx: &mut DecodingContext,
    kb: &K,
) -> Result<(), PluginError> {
    let method = kb.stream_method(&ctx.method).ok_or(PluginError::UnknownMethod)?;

    match method.action {
        StreamAction::Start | StreamAction::Update => {
            let (sign, rate) = ctx.amount.split_at(ctx.amount.len() - INT96_LENGTH);
            if sign.iter().any(|&b| b != 0) || rate[0] & 0x80 != 0 {
                return Err(PluginError::NonCanonical);
            }
        }
        StreamAction::Stop => {
            // Third word of deleteFlow is the receiver, not a rate.
            let (padding, receiver) = ctx.amount.split_at(ADDRESS_PADDING);
            if padding.iter().any(|&b| b != 0) {
                return Err(PluginError::NonCanonical);
            }
            let mut address = [0u8; ADDRESS_LENGTH];
            address.copy_from_slice(receiver);
            ctx.secondary = address;
            ctx.amount = [0u8; 32];
        }
    }

    ctx.action = Some(method.action);
    Ok(())
}
