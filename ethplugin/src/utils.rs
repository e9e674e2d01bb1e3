//! Formatting helpers for review screens.
//!
//! This module provides:
//! - Address formatting (EIP-55 checksum)
//! - Amount formatting with decimals, at full 256-bit precision
//!
//! Both write into any `core::fmt::Write` sink, so screens are rendered
//! straight into the caller's fixed-size buffers without allocating.

use core::fmt;

use ethplugin_common::{EthAddress, Word};
use tiny_keccak::{Hasher as KeccakHasher, Keccak};

/// Decimal digits needed for the largest 256-bit value.
const MAX_DIGITS: usize = 78;

/// Keccak256 hash function as used by Ethereum.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Writes an Ethereum address with EIP-55 checksum.
///
/// The checksum is computed by taking the Keccak256 hash of the lowercase
/// hex address (without 0x prefix) and capitalizing each letter where the
/// corresponding hex digit of the hash is >= 8.
pub fn write_address<W: fmt::Write>(out: &mut W, address: &EthAddress) -> fmt::Result {
    let mut hex_lower = [0u8; 40];
    hex::encode_to_slice(address, &mut hex_lower).map_err(|_| fmt::Error)?;
    let hash = keccak256(&hex_lower);

    let mut checksummed = hex_lower;
    for (i, c) in checksummed.iter_mut().enumerate() {
        if c.is_ascii_alphabetic() {
            let hash_byte = hash[i / 2];
            let nibble = if i % 2 == 0 {
                hash_byte >> 4
            } else {
                hash_byte & 0x0F
            };
            if nibble >= 8 {
                c.make_ascii_uppercase();
            }
        }
    }

    out.write_str("0x")?;
    out.write_str(core::str::from_utf8(&checksummed).map_err(|_| fmt::Error)?)
}

/// Writes a 256-bit big-endian value as a fixed-point decimal.
///
/// `decimals` places are moved behind the decimal point. Trailing zeros of
/// the fractional part are dropped, and so is the point when nothing
/// remains behind it.
pub fn write_amount<W: fmt::Write>(out: &mut W, value: &Word, decimals: u8) -> fmt::Result {
    let mut digits = [0u8; MAX_DIGITS];
    let count = to_decimal_digits(value, &mut digits);
    let digits = &digits[MAX_DIGITS - count..];
    let decimals = decimals as usize;

    // Integer part.
    if count > decimals {
        write_digits(out, &digits[..count - decimals])?;
    } else {
        out.write_str("0")?;
    }

    // Fractional part, left-padded with zeros when the value is small.
    let padding = decimals.saturating_sub(count);
    let frac = &digits[count.saturating_sub(decimals)..];
    let frac = match frac.iter().rposition(|&d| d != b'0') {
        Some(last) => &frac[..=last],
        None => return Ok(()),
    };
    out.write_str(".")?;
    for _ in 0..padding {
        out.write_str("0")?;
    }
    write_digits(out, frac)
}

/// Fills the tail of `digits` with the ASCII decimal digits of `value` and
/// returns how many were written. Zero is written as a single digit.
fn to_decimal_digits(value: &Word, digits: &mut [u8; MAX_DIGITS]) -> usize {
    let mut n = *value;
    let mut count = 0;

    loop {
        let mut rem = 0u16;
        for byte in n.iter_mut() {
            let cur = (rem << 8) | *byte as u16;
            *byte = (cur / 10) as u8;
            rem = cur % 10;
        }
        count += 1;
        digits[MAX_DIGITS - count] = b'0' + rem as u8;

        if n.iter().all(|&b| b == 0) || count == MAX_DIGITS {
            return count;
        }
    }
}

fn write_digits<W: fmt::Write>(out: &mut W, digits: &[u8]) -> fmt::Result {
    out.write_str(core::str::from_utf8(digits).map_err(|_| fmt::Error)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethplugin_common::Body;
    use hex_literal::hex;

    fn amount(value: &Word, decimals: u8) -> Body {
        let mut out = Body::new();
        write_amount(&mut out, value, decimals).unwrap();
        out
    }

    fn word_from_u128(n: u128) -> Word {
        let mut w = [0u8; 32];
        w[16..].copy_from_slice(&n.to_be_bytes());
        w
    }

    #[test]
    fn test_keccak256() {
        // keccak256("") = c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470
        let hash = keccak256(b"");
        assert_eq!(hash[..4], [0xc5, 0xd2, 0x46, 0x01]);

        // transfer(address,uint256)
        let hash = keccak256(b"transfer(address,uint256)");
        assert_eq!(hash[..4], hex!("a9059cbb"));
    }

    #[test]
    fn test_write_address_checksummed() {
        // EIP-55 test vectors
        let mut out = Body::new();
        write_address(&mut out, &hex!("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed")).unwrap();
        assert_eq!(out.as_str(), "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");

        let mut out = Body::new();
        write_address(&mut out, &hex!("52908400098527886e0f7030069857d2e4169ee7")).unwrap();
        assert_eq!(out.as_str(), "0x52908400098527886E0F7030069857D2E4169EE7");
    }

    #[test]
    fn test_write_address_overflow() {
        let mut out = ethplugin_common::Title::new();
        out.push_str("From ").unwrap();
        assert!(write_address(&mut out, &[0xab; 20]).is_err());
    }

    #[test]
    fn test_write_amount_whole() {
        assert_eq!(amount(&word_from_u128(1_000_000_000_000_000_000), 18).as_str(), "1");
        assert_eq!(amount(&word_from_u128(1234), 0).as_str(), "1234");
        assert_eq!(amount(&[0u8; 32], 18).as_str(), "0");
        assert_eq!(amount(&[0u8; 32], 0).as_str(), "0");
    }

    #[test]
    fn test_write_amount_fraction() {
        assert_eq!(amount(&word_from_u128(1_500_000), 6).as_str(), "1.5");
        assert_eq!(amount(&word_from_u128(1), 18).as_str(), "0.000000000000000001");
        assert_eq!(amount(&word_from_u128(123_456), 3).as_str(), "123.456");
    }

    #[test]
    fn test_write_amount_scale() {
        for n in 0..=30u32 {
            let value = word_from_u128(10u128.pow(n));
            assert_eq!(amount(&value, n as u8).as_str(), "1");
            assert_eq!(amount(&value, n as u8 + 2).as_str(), "0.01");
        }
    }

    #[test]
    fn test_write_amount_max() {
        assert_eq!(
            amount(&[0xff; 32], 0).as_str(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
        assert_eq!(
            amount(&[0xff; 32], 77).as_str(),
            "1.15792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
    }

    #[test]
    fn test_write_amount_beyond_256_bits_of_decimals() {
        // More decimals than digits: all padding.
        assert_eq!(
            amount(&word_from_u128(5), 80).as_str(),
            "0.00000000000000000000000000000000000000000000000000000000000000000000000000000005"
        );
    }
}
