//! Lifecycle message handlers.
//!
//! Each handler processes one message kind and returns the result to
//! write back, or the error that rejected the message. Handlers are
//! responsible for:
//! - Checking the context is in the right stage
//! - Validating the payload
//! - Updating the context, or leaving it as it was on failure
//!
//! Decode errors are terminal: the handler that hits one moves the
//! context to `Stage::Failed` before returning it.

mod finalize;
mod init;
mod provide_info;
mod provide_parameter;
mod query_id;
mod query_ui;

pub use finalize::handle_finalize;
pub use init::handle_init_contract;
pub use provide_info::handle_provide_info;
pub use provide_parameter::handle_provide_parameter;
pub use query_id::handle_query_contract_id;
pub use query_ui::handle_query_contract_ui;

use ethplugin_common::{DecodingContext, PluginError, Stage};

/// Fails with `InvalidState` unless the context is in one of `stages`.
fn require_stage(ctx: &DecodingContext, stages: &[Stage]) -> Result<(), PluginError> {
    if stages.contains(&ctx.stage) {
        Ok(())
    } else {
        log::debug!("call not valid in stage {:?}", ctx.stage);
        Err(PluginError::InvalidState)
    }
}

/// Marks the context failed when `error` ends decoding.
fn fail_on_decode_error(ctx: &mut DecodingContext, error: PluginError) -> PluginError {
    if error.is_decode_error() {
        log::warn!("decoding failed: {}", error);
        ctx.stage = Stage::Failed;
    }
    error
}
