//! Message dispatcher.
//!
//! The host calls a plugin with a raw message code and a payload. The
//! dispatcher routes each message to its handler and writes a uniform
//! result back into the payload:
//! - `CheckPresence` is answered without entering dispatch
//! - unknown codes are logged and ignored, to tolerate newer hosts
//! - handler errors become `PluginResult::Error`

use ethplugin_common::{Message, PluginError, PluginOp, PluginResult};
use num_traits::FromPrimitive;

use crate::config::PluginConfig;
use crate::handlers;
use crate::knowledge::{KnowledgeBase, StaticKnowledge};

/// A contract plugin for one family.
#[derive(Debug, Clone)]
pub struct Plugin<K = StaticKnowledge> {
    config: PluginConfig,
    kb: K,
}

impl Plugin {
    /// Creates a plugin with the built-in knowledge base.
    pub const fn new(config: PluginConfig) -> Self {
        Self {
            config,
            kb: StaticKnowledge::new(),
        }
    }
}

impl<K: KnowledgeBase> Plugin<K> {
    /// Creates a plugin with a substitute knowledge base.
    pub fn with_knowledge(config: PluginConfig, kb: K) -> Self {
        Self { config, kb }
    }

    /// Returns the plugin configuration.
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Handles one lifecycle call from the host.
    pub fn call(&self, code: u32, msg: &mut Message<'_>) {
        let Some(op) = PluginOp::from_u32(code) else {
            log::warn!("ignoring unknown message code {:#06x}", code);
            return;
        };

        if op == PluginOp::CheckPresence {
            log::debug!("presence check");
            return;
        }

        if op != msg.op() {
            log::warn!("message code {:?} with {:?} payload", op, msg.op());
            msg.set_result(PluginResult::Error);
            return;
        }

        let result = match self.dispatch(msg) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("{:?} failed: {} (0x{:02x})", op, e, e.code());
                PluginResult::Error
            }
        };
        msg.set_result(result);
    }

    /// Dispatch a message to the appropriate handler.
    fn dispatch(&self, msg: &mut Message<'_>) -> Result<PluginResult, PluginError> {
        match msg {
            Message::CheckPresence => Ok(PluginResult::Ok),
            Message::InitContract(m) => handlers::handle_init_contract(&self.config, &self.kb, m),
            Message::ProvideParameter(m) => handlers::handle_provide_parameter(&self.kb, m),
            Message::ProvideInfo(m) => handlers::handle_provide_info(&self.config, m),
            Message::Finalize(m) => handlers::handle_finalize(&self.kb, m),
            Message::QueryContractId(m) => {
                handlers::handle_query_contract_id(&self.config, &self.kb, m)
            }
            Message::QueryContractUi(m) => handlers::handle_query_contract_ui(&self.kb, m),
        }
    }
}
