//! Streaming parameter decoder.
//!
//! The host feeds calldata one 32-byte window at a time, each tagged with
//! its absolute offset. The decoder keeps its progress in the context
//! (`offset`, `checkpoint`, `skip`, `next_param`) and walks the selector's
//! layout, copying the bytes of every displayed field into its slot.
//!
//! Fields need not be window-aligned. A field that straddles two windows
//! is filled from both; this happens for every word of a call embedded in
//! a `bytes` parameter, which sits 4 bytes off the outer word grid.
//!
//! # Security
//!
//! Offsets and lengths read from calldata are bounded to 16 bits and
//! checked before use. A step either succeeds as a whole or leaves the
//! caller's context untouched.

use ethplugin_common::{
    DecodingContext, EthAddress, PluginError, Ticker, Word, PARAMETER_LENGTH, SELECTOR_SIZE,
};

use crate::knowledge::KnowledgeBase;
use crate::layout::{layout, Field, FieldKind, Slot, ADDRESS_PADDING};

const WINDOW: u16 = PARAMETER_LENGTH as u16;

/// Decodes one calldata window.
///
/// `offset` is the absolute offset of `window` in the calldata, selector
/// included. Returns the context as it stands after the window; the input
/// context is not modified, so the caller decides whether to commit.
pub fn decode_window<K: KnowledgeBase + ?Sized>(
    ctx: &DecodingContext,
    kb: &K,
    window: &Word,
    offset: u32,
) -> Result<DecodingContext, PluginError> {
    let selector = ctx.selector.ok_or(PluginError::InvalidState)?;
    // Parameters start after the selector, which is always behind the cursor.
    let start = offset
        .checked_sub(SELECTOR_SIZE as u32)
        .ok_or(PluginError::Rewind)?;
    let start = u16::try_from(start).map_err(|_| PluginError::OutOfRange)?;
    let end = start.checked_add(WINDOW).ok_or(PluginError::OutOfRange)?;

    if start < ctx.offset {
        log::debug!("window at {} behind expected {}", start, ctx.offset);
        return Err(PluginError::Rewind);
    }

    let fields = layout(selector).ok_or(PluginError::NoLayout)?;
    let mut next = ctx.clone();

    if let Some(field) = fields.get(ctx.next_param as usize) {
        check_progress(ctx, field)?;
        if start > ctx.offset && start > ctx.checkpoint {
            log::debug!("window at {} skips bytes of {}", start, field.name);
            return Err(PluginError::Gap);
        }

        let mut pos = start.max(next.checkpoint);
        while pos < end {
            let Some(field) = fields.get(next.next_param as usize) else {
                break;
            };
            let field_end = next
                .checkpoint
                .checked_add(field.kind.span())
                .ok_or(PluginError::OutOfRange)?;
            let chunk_end = field_end.min(end);

            if field.kind.is_word_valued() && (pos != next.checkpoint || field_end > end) {
                return Err(PluginError::Misaligned);
            }

            let from = pos.checked_sub(start).ok_or(PluginError::InvalidState)?;
            let to = chunk_end.checked_sub(start).ok_or(PluginError::InvalidState)?;
            let bytes = window
                .get(from as usize..to as usize)
                .ok_or(PluginError::InvalidState)?;
            let at = pos.checked_sub(next.checkpoint).ok_or(PluginError::InvalidState)? as usize;
            store(&mut next, field, at, bytes)?;

            if chunk_end < field_end {
                // Rest of the field comes with the next window.
                break;
            }

            let resume = complete(&mut next, kb, field, bytes, field_end)?;
            log::debug!("{} decoded at {}", field.name, next.checkpoint);
            next.next_param += 1;
            next.fields_found += 1;
            next.checkpoint = resume;
            pos = resume;
        }
    }

    next.offset = end;
    next.skip = next.checkpoint.saturating_sub(end);
    Ok(next)
}

/// Rejects a context whose cursor has run past the field in progress.
///
/// The cursor (`offset`) may trail the field start after a jump, but it
/// never passes the end of a field that is still open.
fn check_progress(ctx: &DecodingContext, field: &Field) -> Result<(), PluginError> {
    let field_end = ctx
        .checkpoint
        .checked_add(field.kind.span())
        .ok_or(PluginError::InvalidState)?;
    if ctx.offset > ctx.checkpoint && ctx.offset >= field_end {
        log::warn!("cursor {} past open field {}", ctx.offset, field.name);
        return Err(PluginError::InvalidState);
    }
    Ok(())
}

/// Returns the context bytes a slot stands for.
fn slot_mut(ctx: &mut DecodingContext, slot: Slot) -> Option<&mut [u8]> {
    match slot {
        Slot::Amount => Some(&mut ctx.amount[..]),
        Slot::Primary => Some(&mut ctx.primary[..]),
        Slot::Secondary => Some(&mut ctx.secondary[..]),
        Slot::Method => Some(&mut ctx.method[..]),
        Slot::Discard => None,
    }
}

/// Stores `bytes`, found at `at` within the field, into the field's slot.
fn store(
    ctx: &mut DecodingContext,
    field: &Field,
    at: usize,
    bytes: &[u8],
) -> Result<(), PluginError> {
    match field.kind {
        FieldKind::Address => {
            let mut dest = slot_mut(ctx, field.slot);
            for (i, &b) in bytes.iter().enumerate() {
                let index = at + i;
                if index < ADDRESS_PADDING {
                    if b != 0 {
                        return Err(PluginError::NonCanonical);
                    }
                } else if let Some(dest) = dest.as_deref_mut() {
                    dest[index - ADDRESS_PADDING] = b;
                }
            }
        }
        FieldKind::Amount | FieldKind::Method => {
            if let Some(dest) = slot_mut(ctx, field.slot) {
                dest[at..at + bytes.len()].copy_from_slice(bytes);
            }
        }
        FieldKind::Ignored | FieldKind::Offset { .. } | FieldKind::Length { .. } => {}
    }
    Ok(())
}

/// Finishes a field and returns where the next one starts.
///
/// `word` holds the whole field for word-valued kinds.
fn complete<K: KnowledgeBase + ?Sized>(
    ctx: &mut DecodingContext,
    kb: &K,
    field: &Field,
    word: &[u8],
    field_end: u16,
) -> Result<u16, PluginError> {
    match field.kind {
        FieldKind::Offset { heads_after } => {
            let target = read_u16(word)?;
            let head_end = (heads_after as u16)
                .checked_add(1)
                .and_then(|words| words.checked_mul(WINDOW))
                .and_then(|len| ctx.checkpoint.checked_add(len))
                .ok_or(PluginError::OutOfRange)?;
            if target < head_end {
                return Err(PluginError::OutOfRange);
            }
            Ok(target)
        }
        FieldKind::Length { min } => {
            let len = read_u16(word)?;
            if len < min {
                return Err(PluginError::OutOfRange);
            }
            field_end.checked_add(len).ok_or(PluginError::OutOfRange)?;
            Ok(field_end)
        }
        FieldKind::Address if field.resolve => {
            let token = ctx.primary;
            resolve_token(ctx, kb, &token);
            Ok(field_end)
        }
        _ => Ok(field_end),
    }
}

/// Reads a word that must fit 16 bits.
fn read_u16(word: &[u8]) -> Result<u16, PluginError> {
    match word {
        [head @ .., hi, lo] if head.iter().all(|&b| b == 0) => {
            Ok(u16::from_be_bytes([*hi, *lo]))
        }
        _ => Err(PluginError::OutOfRange),
    }
}

/// Records the ticker and decimals of `token` when the knowledge base
/// has it. A miss leaves the ticker unresolved.
pub fn resolve_token<K: KnowledgeBase + ?Sized>(
    ctx: &mut DecodingContext,
    kb: &K,
    token: &EthAddress,
) {
    match kb.token(token) {
        Some(token) => match Ticker::try_from_str(token.ticker) {
            Some(ticker) => ctx.set_token(ticker, token.decimals),
            None => log::warn!("ticker {} too long", token.ticker),
        },
        None => log::debug!("token not in knowledge base"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::StaticKnowledge;
    use ethplugin_common::{SelectorId, Stage};
    use hex_literal::hex;

    const DAIX: [u8; 20] = hex!("1305f6b6df9dc47159d12eb7ac2804d4a33173c2");
    const EXCHANGE: [u8; 20] = hex!("9bef427fa1ff5269b824eed9415f7622b81244f5");

    fn word(n: u64) -> Word {
        let mut w = [0u8; 32];
        w[24..].copy_from_slice(&n.to_be_bytes());
        w
    }

    fn address_word(address: &[u8; 20]) -> Word {
        let mut w = [0u8; 32];
        w[12..].copy_from_slice(address);
        w
    }

    fn parsing(id: SelectorId) -> DecodingContext {
        let mut ctx = DecodingContext::new();
        ctx.selector = Some(id);
        ctx.stage = Stage::Parsing;
        ctx
    }

    /// Parameter area of `callAgreement(cfa, createFlow(DAIx, exchange, rate, ""), "")`.
    fn call_agreement_params(method: [u8; 4], rate: Word) -> Vec<u8> {
        let mut embedded = Vec::new();
        embedded.extend_from_slice(&method);
        embedded.extend_from_slice(&address_word(&DAIX));
        embedded.extend_from_slice(&address_word(&EXCHANGE));
        embedded.extend_from_slice(&rate);
        embedded.extend_from_slice(&word(0x80));
        embedded.extend_from_slice(&word(0));
        let len = embedded.len();
        embedded.resize(len.div_ceil(32) * 32, 0);

        let mut params = Vec::new();
        params.extend_from_slice(&address_word(&hex!("6eee6060f715257b970700bc2656de21dedf074c")));
        params.extend_from_slice(&word(0x60));
        params.extend_from_slice(&word(0x60 + 32 + embedded.len() as u64));
        params.extend_from_slice(&word(len as u64));
        params.extend_from_slice(&embedded);
        params.extend_from_slice(&word(0));
        params
    }

    fn feed(ctx: DecodingContext, params: &[u8]) -> Result<DecodingContext, PluginError> {
        let kb = StaticKnowledge::new();
        let mut ctx = ctx;
        for (i, chunk) in params.chunks(32).enumerate() {
            let mut w = [0u8; 32];
            w[..chunk.len()].copy_from_slice(chunk);
            ctx = decode_window(&ctx, &kb, &w, 4 + 32 * i as u32)?;
        }
        Ok(ctx)
    }

    #[test]
    fn test_single_amount() {
        let kb = StaticKnowledge::new();
        let ctx = parsing(SelectorId::Upgrade);
        let value = word(1_000_000_000_000_000_000);

        let next = decode_window(&ctx, &kb, &value, 4).unwrap();
        assert_eq!(next.amount, value);
        assert_eq!(next.fields_found, 1);
        assert_eq!(next.next_param, 1);
        assert_eq!(next.offset, 32);
        // Input untouched.
        assert_eq!(ctx.fields_found, 0);
    }

    #[test]
    fn test_call_agreement_straddling_fields() {
        let rate = word(1_000_000_000_000_000_000);
        let params = call_agreement_params(hex!("62fc305e"), rate);
        let ctx = feed(parsing(SelectorId::CallAgreement), &params).unwrap();

        assert_eq!(ctx.fields_found, 7);
        assert_eq!(ctx.method, hex!("62fc305e"));
        assert_eq!(ctx.primary, DAIX);
        assert_eq!(ctx.secondary, EXCHANGE);
        assert_eq!(ctx.amount, rate);
        assert_eq!(ctx.ticker.as_str(), "DAIx");
        assert_eq!(ctx.display_decimals(), 18);
        assert_eq!(ctx.offset as usize, params.len());
    }

    #[test]
    fn test_skipped_head_window_is_bookkeeping() {
        let kb = StaticKnowledge::new();
        let params = call_agreement_params(hex!("62fc305e"), word(1));
        let mut ctx = parsing(SelectorId::CallAgreement);
        for i in 0..2 {
            let w: Word = params[32 * i..32 * (i + 1)].try_into().unwrap();
            ctx = decode_window(&ctx, &kb, &w, 4 + 32 * i as u32).unwrap();
        }
        assert_eq!(ctx.checkpoint, 0x60);
        assert_eq!(ctx.skip, 0x20);

        // The userData offset word is never needed; the host may omit it.
        let w: Word = params[0x60..0x80].try_into().unwrap();
        let ctx = decode_window(&ctx, &kb, &w, 4 + 0x60).unwrap();
        assert_eq!(ctx.fields_found, 3);
    }

    #[test]
    fn test_rewind() {
        let kb = StaticKnowledge::new();
        let ctx = parsing(SelectorId::Upgrade);
        let next = decode_window(&ctx, &kb, &word(5), 4).unwrap();
        assert_eq!(decode_window(&next, &kb, &word(6), 4), Err(PluginError::Rewind));
    }

    #[test]
    fn test_gap() {
        let kb = StaticKnowledge::new();
        let ctx = parsing(SelectorId::SafeTransfer);
        let next = decode_window(&ctx, &kb, &address_word(&DAIX), 4).unwrap();
        assert_eq!(
            decode_window(&next, &kb, &word(1), 4 + 64),
            Err(PluginError::Gap)
        );
    }

    #[test]
    fn test_offset_below_selector() {
        let kb = StaticKnowledge::new();
        let ctx = parsing(SelectorId::Upgrade);
        assert_eq!(decode_window(&ctx, &kb, &word(1), 0), Err(PluginError::Rewind));
        assert_eq!(decode_window(&ctx, &kb, &word(1), 3), Err(PluginError::Rewind));
    }

    #[test]
    fn test_cursor_past_open_field() {
        let kb = StaticKnowledge::new();
        let mut ctx = parsing(SelectorId::Upgrade);
        ctx.offset = 40;
        assert_eq!(
            decode_window(&ctx, &kb, &word(1), 44),
            Err(PluginError::InvalidState)
        );

        ctx.offset = 32;
        assert_eq!(
            decode_window(&ctx, &kb, &word(1), 36),
            Err(PluginError::InvalidState)
        );
    }

    #[test]
    fn test_cursor_inside_open_field() {
        let kb = StaticKnowledge::new();
        let mut ctx = parsing(SelectorId::MintToken);
        let mut w = [0u8; 32];
        w[..16].copy_from_slice(&[0xaa; 16]);
        // First half of eventId already taken from a window at 4 - 16.
        ctx.offset = 16;
        let next = decode_window(&ctx, &kb, &w, 20).unwrap();
        assert_eq!(next.amount[16..], [0xaa; 16]);
        assert_eq!(next.fields_found, 1);
        assert_eq!(next.checkpoint, 32);
    }

    #[test]
    fn test_no_layout() {
        let kb = StaticKnowledge::new();
        let ctx = parsing(SelectorId::BatchCall);
        assert_eq!(
            decode_window(&ctx, &kb, &word(0x20), 4),
            Err(PluginError::NoLayout)
        );
    }

    #[test]
    fn test_non_canonical_address() {
        let kb = StaticKnowledge::new();
        let ctx = parsing(SelectorId::MintToken);
        let ctx = decode_window(&ctx, &kb, &word(7), 4).unwrap();
        let mut dirty = address_word(&DAIX);
        dirty[0] = 1;
        assert_eq!(
            decode_window(&ctx, &kb, &dirty, 36),
            Err(PluginError::NonCanonical)
        );
    }

    #[test]
    fn test_offset_into_head() {
        let mut params = call_agreement_params(hex!("62fc305e"), word(1));
        params[32..64].copy_from_slice(&word(0x40));
        assert_eq!(
            feed(parsing(SelectorId::CallAgreement), &params),
            Err(PluginError::OutOfRange)
        );
    }

    #[test]
    fn test_offset_too_large() {
        let mut params = call_agreement_params(hex!("62fc305e"), word(1));
        params[32..64].copy_from_slice(&word(0x1_0000));
        assert_eq!(
            feed(parsing(SelectorId::CallAgreement), &params),
            Err(PluginError::OutOfRange)
        );
    }

    #[test]
    fn test_unaligned_offset() {
        let mut params = call_agreement_params(hex!("62fc305e"), word(1));
        params[32..64].copy_from_slice(&word(0x61));
        assert_eq!(
            feed(parsing(SelectorId::CallAgreement), &params),
            Err(PluginError::Misaligned)
        );
    }

    #[test]
    fn test_short_payload() {
        let mut params = call_agreement_params(hex!("62fc305e"), word(1));
        params[0x60..0x80].copy_from_slice(&word(0x44));
        assert_eq!(
            feed(parsing(SelectorId::CallAgreement), &params),
            Err(PluginError::OutOfRange)
        );
    }

    #[test]
    fn test_over_supply_is_ignored() {
        let kb = StaticKnowledge::new();
        let ctx = parsing(SelectorId::Upgrade);
        let ctx = decode_window(&ctx, &kb, &word(42), 4).unwrap();
        let extra = decode_window(&ctx, &kb, &word(99), 36).unwrap();
        assert_eq!(extra.amount, word(42));
        assert_eq!(extra.fields_found, 1);
        assert_eq!(extra.offset, 64);
    }

    #[test]
    fn test_upgrade_by_eth_accepts_any_window() {
        let kb = StaticKnowledge::new();
        let ctx = parsing(SelectorId::UpgradeByEth);
        let next = decode_window(&ctx, &kb, &word(1), 4).unwrap();
        assert_eq!(next.fields_found, 0);
        assert_eq!(next.amount, [0u8; 32]);
    }

    #[test]
    fn test_unknown_token_stays_unresolved() {
        let params = {
            let mut p = call_agreement_params(hex!("62fc305e"), word(1));
            // Token word of the embedded call starts at 0x84.
            p[0x84 + 12..0x84 + 32].copy_from_slice(&[0x42; 20]);
            p
        };
        let ctx = feed(parsing(SelectorId::CallAgreement), &params).unwrap();
        assert_eq!(ctx.primary, [0x42; 20]);
        assert!(!ctx.has_ticker());
        assert_eq!(ctx.fields_found, 7);
    }
}
