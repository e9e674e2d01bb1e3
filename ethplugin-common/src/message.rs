//! Lifecycle message payloads.
//!
//! Each payload borrows the decoding context for the duration of one
//! call and carries a `result` the plugin fills in before returning.

use crate::context::DecodingContext;
use crate::opcodes::{PluginOp, PluginResult};
use crate::types::{Body, EthAddress, Label, Selector, Title, TokenInfo, Word};

/// INIT_CONTRACT: classify the call and reset the context.
#[derive(Debug)]
pub struct InitContract<'a> {
    pub context: &'a mut DecodingContext,
    /// Destination (`to`) of the transaction.
    pub destination: EthAddress,
    /// First four bytes of the calldata.
    pub selector: Selector,
    /// Transaction value in wei (big-endian).
    pub value: Word,
    pub result: PluginResult,
}

impl<'a> InitContract<'a> {
    pub fn new(
        context: &'a mut DecodingContext,
        destination: EthAddress,
        selector: Selector,
        value: Word,
    ) -> Self {
        Self {
            context,
            destination,
            selector,
            value,
            result: PluginResult::Unavailable,
        }
    }
}

/// PROVIDE_PARAMETER: one calldata window.
#[derive(Debug)]
pub struct ProvideParameter<'a> {
    pub context: &'a mut DecodingContext,
    /// 32 bytes of calldata, zero-padded past the end of the call.
    pub parameter: Word,
    /// Absolute offset of `parameter` in the calldata, selector included.
    pub offset: u32,
    pub result: PluginResult,
}

impl<'a> ProvideParameter<'a> {
    pub fn new(context: &'a mut DecodingContext, parameter: Word, offset: u32) -> Self {
        Self {
            context,
            parameter,
            offset,
            result: PluginResult::Unavailable,
        }
    }
}

/// PROVIDE_INFO: token metadata the host resolved on its side.
#[derive(Debug)]
pub struct ProvideInfo<'a> {
    pub context: &'a mut DecodingContext,
    /// None when the host registry had no entry either.
    pub token: Option<TokenInfo>,
    pub result: PluginResult,
}

impl<'a> ProvideInfo<'a> {
    pub fn new(context: &'a mut DecodingContext, token: Option<TokenInfo>) -> Self {
        Self {
            context,
            token,
            result: PluginResult::Unavailable,
        }
    }
}

/// FINALIZE: every window was sent.
#[derive(Debug)]
pub struct Finalize<'a> {
    pub context: &'a mut DecodingContext,
    /// Number of review screens (output).
    pub screen_count: u8,
    /// Token the plugin could not resolve itself (output).
    pub token_lookup: Option<EthAddress>,
    pub result: PluginResult,
}

impl<'a> Finalize<'a> {
    pub fn new(context: &'a mut DecodingContext) -> Self {
        Self {
            context,
            screen_count: 0,
            token_lookup: None,
            result: PluginResult::Unavailable,
        }
    }
}

/// QUERY_CONTRACT_ID: plugin name and operation label.
#[derive(Debug)]
pub struct QueryContractId<'a> {
    pub context: &'a DecodingContext,
    /// Plugin name (output).
    pub name: Label,
    /// Operation label (output).
    pub label: Label,
    pub result: PluginResult,
}

impl<'a> QueryContractId<'a> {
    pub fn new(context: &'a DecodingContext) -> Self {
        Self {
            context,
            name: Label::new(),
            label: Label::new(),
            result: PluginResult::Unavailable,
        }
    }
}

/// QUERY_CONTRACT_UI: one review screen.
#[derive(Debug)]
pub struct QueryContractUi<'a> {
    pub context: &'a DecodingContext,
    pub screen_index: u8,
    /// Screen title (output).
    pub title: Title,
    /// Screen body (output).
    pub body: Body,
    pub result: PluginResult,
}

impl<'a> QueryContractUi<'a> {
    pub fn new(context: &'a DecodingContext, screen_index: u8) -> Self {
        Self {
            context,
            screen_index,
            title: Title::new(),
            body: Body::new(),
            result: PluginResult::Unavailable,
        }
    }
}

/// A lifecycle message with its payload.
#[derive(Debug)]
pub enum Message<'a> {
    CheckPresence,
    InitContract(InitContract<'a>),
    ProvideParameter(ProvideParameter<'a>),
    ProvideInfo(ProvideInfo<'a>),
    Finalize(Finalize<'a>),
    QueryContractId(QueryContractId<'a>),
    QueryContractUi(QueryContractUi<'a>),
}

impl Message<'_> {
    /// Returns the message code this payload belongs to.
    pub fn op(&self) -> PluginOp {
        match self {
            Message::CheckPresence => PluginOp::CheckPresence,
            Message::InitContract(_) => PluginOp::InitContract,
            Message::ProvideParameter(_) => PluginOp::ProvideParameter,
            Message::ProvideInfo(_) => PluginOp::ProvideInfo,
            Message::Finalize(_) => PluginOp::Finalize,
            Message::QueryContractId(_) => PluginOp::QueryContractId,
            Message::QueryContractUi(_) => PluginOp::QueryContractUi,
        }
    }

    /// Returns the result stored in the payload.
    pub fn result(&self) -> PluginResult {
        match self {
            Message::CheckPresence => PluginResult::Ok,
            Message::InitContract(m) => m.result,
            Message::ProvideParameter(m) => m.result,
            Message::ProvideInfo(m) => m.result,
            Message::Finalize(m) => m.result,
            Message::QueryContractId(m) => m.result,
            Message::QueryContractUi(m) => m.result,
        }
    }

    /// Stores the result in the payload.
    pub fn set_result(&mut self, result: PluginResult) {
        match self {
            Message::CheckPresence => {}
            Message::InitContract(m) => m.result = result,
            Message::ProvideParameter(m) => m.result = result,
            Message::ProvideInfo(m) => m.result = result,
            Message::Finalize(m) => m.result = result,
            Message::QueryContractId(m) => m.result = result,
            Message::QueryContractUi(m) => m.result = result,
        }
    }
}
