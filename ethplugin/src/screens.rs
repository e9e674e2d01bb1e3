//! Review screens.
//!
//! The screens of a call are a fixed list per selector. Each one is
//! rendered on demand from the finalized context; nothing is cached
//! between queries.

use core::fmt::Write;

use ethplugin_common::{Body, DecodingContext, PluginError, PluginResult, SelectorId, Title};

use crate::knowledge::KnowledgeBase;
use crate::utils::{write_address, write_amount};

/// One review screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    /// Converted amount.
    Amount,
    /// Underlying and super token of a conversion.
    Convert,
    /// Stream lifecycle action.
    Stream,
    /// Streamed token.
    Token,
    /// Ricochet exchange pair.
    Exchange,
    /// Flow rate, in token units per second.
    FlowRate,
    /// POAP event id.
    Event,
    /// Receiving address.
    Beneficiary,
    /// POAP badge id.
    Badge,
    /// Sending address.
    From,
    /// Receiving address of a transfer.
    To,
}

const CONVERSION: &[ScreenKind] = &[ScreenKind::Amount, ScreenKind::Convert];
const STREAM: &[ScreenKind] = &[
    ScreenKind::Stream,
    ScreenKind::Token,
    ScreenKind::Exchange,
    ScreenKind::FlowRate,
];
const MINT: &[ScreenKind] = &[ScreenKind::Event, ScreenKind::Beneficiary];
const TRANSFER: &[ScreenKind] = &[ScreenKind::Badge, ScreenKind::From, ScreenKind::To];

/// Returns the screens of a selector, in display order.
pub fn screens(id: SelectorId) -> &'static [ScreenKind] {
    match id {
        SelectorId::Upgrade
        | SelectorId::UpgradeByEth
        | SelectorId::Downgrade
        | SelectorId::DowngradeToEth => CONVERSION,
        SelectorId::CallAgreement => STREAM,
        SelectorId::MintToken => MINT,
        SelectorId::SafeTransfer => TRANSFER,
        SelectorId::BatchCall => &[],
    }
}

/// Number of screens of a selector.
pub fn screen_count(id: SelectorId) -> u8 {
    screens(id).len() as u8
}

/// Returns true if the selector shows the ticker of the primary token.
pub fn shows_token(id: SelectorId) -> bool {
    screens(id)
        .iter()
        .any(|s| matches!(s, ScreenKind::Convert | ScreenKind::Token))
}

/// Renders screen `index` into `title` and `body`.
///
/// Both buffers must be empty. Returns `NoMoreScreens` past the last
/// screen of the selector.
pub fn render<K: KnowledgeBase + ?Sized>(
    ctx: &DecodingContext,
    kb: &K,
    index: u8,
    title: &mut Title,
    body: &mut Body,
) -> Result<PluginResult, PluginError> {
    let id = ctx.selector.ok_or(PluginError::InvalidState)?;
    let Some(&screen) = screens(id).get(index as usize) else {
        return Ok(PluginResult::NoMoreScreens);
    };

    let written = match screen {
        ScreenKind::Amount => title
            .push_str("Amount")
            .and_then(|_| write_amount(body, &ctx.amount, ctx.display_decimals())),
        ScreenKind::Convert => title
            .push_str("Convert")
            .and_then(|_| write_conversion(body, ctx, kb, id)),
        ScreenKind::Stream => {
            let method = kb.stream_method(&ctx.method).ok_or(PluginError::UnknownMethod)?;
            title.push_str("Stream").and_then(|_| body.push_str(method.label))
        }
        ScreenKind::Token => title.push_str("Token").and_then(|_| write_ticker(body, ctx)),
        ScreenKind::Exchange => title.push_str("Exchange").and_then(|_| {
            match kb.pair(&ctx.secondary) {
                Some(pair) => write!(body, "{} -> {}", pair.sent, pair.received),
                None => write_address(body, &ctx.secondary),
            }
        }),
        ScreenKind::FlowRate => title
            .push_str("Flow Rate")
            .and_then(|_| write_amount(body, &ctx.amount, ctx.display_decimals())),
        ScreenKind::Event => title
            .push_str("Event")
            .and_then(|_| body.push_str("#"))
            .and_then(|_| write_amount(body, &ctx.amount, 0)),
        ScreenKind::Beneficiary => title
            .push_str("Beneficiary")
            .and_then(|_| write_address(body, &ctx.primary)),
        ScreenKind::Badge => title.push_str("Token").and_then(|_| {
            if ctx.has_ticker() {
                write!(body, "{} ", ctx.ticker)?;
            }
            body.push_str("#")?;
            write_amount(body, &ctx.amount, 0)
        }),
        ScreenKind::From => title
            .push_str("From")
            .and_then(|_| write_address(body, &ctx.secondary)),
        ScreenKind::To => title.push_str("To").and_then(|_| write_address(body, &ctx.primary)),
    };

    written.map_err(|_| PluginError::Display)?;
    Ok(PluginResult::Ok)
}

/// Ticker of the primary token, or its address when unresolved.
fn write_ticker<W: Write>(out: &mut W, ctx: &DecodingContext) -> core::fmt::Result {
    if ctx.has_ticker() {
        out.write_str(ctx.ticker.as_str())
    } else {
        write_address(out, &ctx.primary)
    }
}

/// `DAI -> DAIx` for an upgrade, `DAIx -> DAI` for a downgrade.
fn write_conversion<W: Write, K: KnowledgeBase + ?Sized>(
    out: &mut W,
    ctx: &DecodingContext,
    kb: &K,
    id: SelectorId,
) -> core::fmt::Result {
    match kb.token(&ctx.primary).and_then(|t| t.underlying.map(|u| (u, t.ticker))) {
        Some((underlying, ticker)) if id.is_upgrade() => {
            write!(out, "{} -> {}", underlying, ticker)
        }
        Some((underlying, ticker)) => write!(out, "{} -> {}", ticker, underlying),
        None => write_ticker(out, ctx),
    }
}
