//! PROVIDE_INFO handler.

use ethplugin_common::{PluginError, PluginResult, ProvideInfo, Stage, TokenInfo};

use super::require_stage;
use crate::config::PluginConfig;

/// Largest decimal count a 256-bit amount can use.
const MAX_DECIMALS: u8 = 77;

/// Handles PROVIDE_INFO.
///
/// Host metadata only fills a gap: it applies to the primary token, and
/// only when the knowledge base did not resolve it and the configuration
/// accepts host metadata at all.
///
/// # Security
///
/// - The host is untrusted; ticker and decimals are validated even when
///   the metadata ends up unused
/// - A ticker resolved by the plugin is never overwritten
pub fn handle_provide_info(
    config: &PluginConfig,
    msg: &mut ProvideInfo<'_>,
) -> Result<PluginResult, PluginError> {
    let ctx = &mut *msg.context;
    require_stage(ctx, &[Stage::Parsing, Stage::Finalized])?;

    let Some(info) = &msg.token else {
        return Ok(PluginResult::Ok);
    };
    validate(info)?;

    if !config.accept_host_metadata {
        log::debug!("host metadata ignored");
    } else if info.address != ctx.primary {
        log::debug!("host metadata for another token");
    } else if ctx.has_ticker() {
        log::debug!("token already resolved");
    } else {
        log::info!("using host metadata for {}", info.ticker);
        ctx.set_token(info.ticker, info.decimals);
    }
    Ok(PluginResult::Ok)
}

fn validate(info: &TokenInfo) -> Result<(), PluginError> {
    let ticker = info.ticker.as_str();
    if ticker.is_empty() || !ticker.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(PluginError::InvalidParameter);
    }
    if info.decimals > MAX_DECIMALS {
        return Err(PluginError::InvalidParameter);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethplugin_common::{DecodingContext, SelectorId, Ticker};

    fn info(address: [u8; 20], ticker: &str, decimals: u8) -> TokenInfo {
        TokenInfo {
            address,
            ticker: Ticker::try_from_str(ticker).unwrap(),
            decimals,
        }
    }

    fn finalized(primary: [u8; 20]) -> DecodingContext {
        let mut ctx = DecodingContext::new();
        ctx.selector = Some(SelectorId::Upgrade);
        ctx.stage = Stage::Finalized;
        ctx.primary = primary;
        ctx
    }

    fn provide(
        config: PluginConfig,
        ctx: &mut DecodingContext,
        token: Option<TokenInfo>,
    ) -> Result<PluginResult, PluginError> {
        let mut msg = ProvideInfo::new(ctx, token);
        handle_provide_info(&config, &mut msg)
    }

    fn accepting() -> PluginConfig {
        PluginConfig {
            accept_host_metadata: true,
            ..PluginConfig::ricochet()
        }
    }

    #[test]
    fn test_fills_unknown_token() {
        let mut ctx = finalized([0x44; 20]);
        let result = provide(accepting(), &mut ctx, Some(info([0x44; 20], "FOOx", 6)));
        assert_eq!(result, Ok(PluginResult::Ok));
        assert_eq!(ctx.ticker.as_str(), "FOOx");
        assert_eq!(ctx.display_decimals(), 6);
    }

    #[test]
    fn test_never_overrides_known_token() {
        let mut ctx = finalized([0x44; 20]);
        ctx.set_token(Ticker::try_from_str("DAIx").unwrap(), 18);
        provide(accepting(), &mut ctx, Some(info([0x44; 20], "EVIL", 0))).unwrap();
        assert_eq!(ctx.ticker.as_str(), "DAIx");
        assert_eq!(ctx.display_decimals(), 18);
    }

    #[test]
    fn test_ignores_other_address() {
        let mut ctx = finalized([0x44; 20]);
        provide(accepting(), &mut ctx, Some(info([0x45; 20], "FOOx", 6))).unwrap();
        assert!(!ctx.has_ticker());
    }

    #[test]
    fn test_strict_config_ignores_metadata() {
        let config = PluginConfig {
            accept_host_metadata: false,
            ..PluginConfig::ricochet()
        };
        let mut ctx = finalized([0x44; 20]);
        assert_eq!(
            provide(config, &mut ctx, Some(info([0x44; 20], "FOOx", 6))),
            Ok(PluginResult::Ok)
        );
        assert!(!ctx.has_ticker());
    }

    #[test]
    fn test_rejects_malformed_metadata() {
        let mut ctx = finalized([0x44; 20]);
        let malformed = [
            info([0x44; 20], "", 6),
            info([0x44; 20], "A B", 6),
            info([0x44; 20], "FOO", 78),
        ];
        for bad in malformed {
            assert_eq!(
                provide(accepting(), &mut ctx, Some(bad)),
                Err(PluginError::InvalidParameter)
            );
        }
        assert!(!ctx.has_ticker());
    }

    #[test]
    fn test_missing_payload_and_stage() {
        let mut ctx = finalized([0x44; 20]);
        assert_eq!(provide(accepting(), &mut ctx, None), Ok(PluginResult::Ok));

        ctx.stage = Stage::Failed;
        assert_eq!(
            provide(accepting(), &mut ctx, Some(info([0x44; 20], "FOOx", 6))),
            Err(PluginError::InvalidState)
        );
    }
}
