//! The escape-coded integer packing used by kerning sub-lists.
//!
//! Counts and partner code points are stored in one to three bytes,
//! biased toward values below 254 so a typical Latin kerning pair costs
//! two bytes in total. The first byte selects the form: `0` escapes a
//! two-byte form covering 254..=509, `1` escapes a three-byte form
//! holding the full big-endian value, and any other byte holds the
//! value plus one.

/// The maximum number of bytes a single encoded value can occupy.
pub const MAX_ENCODED_LEN: usize = 3;

/// The smallest value that needs the two-byte form.
const TWO_BYTE_MIN: u16 = 254;

/// The smallest value that needs the three-byte form.
const THREE_BYTE_MIN: u16 = 510;

/// Encode `value` into the front of `buf`, returning the number of
/// bytes written.
///
/// Zero is emitted in the three-byte form: its nominal one-byte
/// encoding would collide with the three-byte escape prefix. Valid
/// kerning tables never contain an encoded zero (counts are at least 1
/// and partner code points are at least 32), so the long form only
/// matters for round-tripping arbitrary values.
pub fn encode(value: u16, buf: &mut [u8; MAX_ENCODED_LEN]) -> usize {
    if value == 0 || value >= THREE_BYTE_MIN {
        let [hi, lo] = value.to_be_bytes();
        buf[0] = 1;
        buf[1] = hi;
        buf[2] = lo;
        3
    } else if value >= TWO_BYTE_MIN {
        buf[0] = 0;
        buf[1] = (value - TWO_BYTE_MIN) as u8;
        2
    } else {
        buf[0] = value as u8 + 1;
        1
    }
}

/// The number of bytes [`encode`] uses for `value`.
pub const fn encoded_len(value: u16) -> usize {
    if value == 0 || value >= THREE_BYTE_MIN {
        3
    } else if value >= TWO_BYTE_MIN {
        2
    } else {
        1
    }
}

/// Decode a single value from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed, or `None` if
/// `bytes` is truncated.
pub fn decode(bytes: &[u8]) -> Option<(u16, usize)> {
    let (&first, rest) = bytes.split_first()?;
    match first {
        0 => rest.first().map(|&b| (b as u16 + TWO_BYTE_MIN, 2)),
        1 => match rest {
            [hi, lo, ..] => Some((u16::from_be_bytes([*hi, *lo]), 3)),
            _ => None,
        },
        _ => Some((first as u16 - 1, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: u16) -> usize {
        let mut buf = [0u8; MAX_ENCODED_LEN];
        let len = encode(value, &mut buf);
        let (decoded, used) = decode(&buf[..len]).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(used, len);
        len
    }

    #[test]
    fn boundary_encodings() {
        let mut buf = [0u8; MAX_ENCODED_LEN];
        assert_eq!(encode(0, &mut buf), 3);
        assert_eq!(buf, [1, 0, 0]);
        assert_eq!(encode(1, &mut buf), 1);
        assert_eq!(buf[0], 2);
        assert_eq!(encode(253, &mut buf), 1);
        assert_eq!(buf[0], 254);
        assert_eq!(encode(254, &mut buf), 2);
        assert_eq!(buf[..2], [0, 0]);
        assert_eq!(encode(509, &mut buf), 2);
        assert_eq!(buf[..2], [0, 255]);
        assert_eq!(encode(510, &mut buf), 3);
        assert_eq!(buf, [1, 1, 254]);
        assert_eq!(encode(u16::MAX, &mut buf), 3);
        assert_eq!(buf, [1, 255, 255]);
    }

    #[test]
    fn roundtrip_all_values() {
        for value in 0..=u16::MAX {
            let len = roundtrip(value);
            assert_eq!(len, encoded_len(value));
            assert!(len <= MAX_ENCODED_LEN);
        }
    }

    #[test]
    fn decode_tolerates_nominal_one_byte_254() {
        // an encoder that stretched the one-byte form to its last value
        assert_eq!(decode(&[255]), Some((254, 1)));
    }

    #[test]
    fn decode_truncated() {
        assert_eq!(decode(&[]), None);
        assert_eq!(decode(&[0]), None);
        assert_eq!(decode(&[1]), None);
        assert_eq!(decode(&[1, 2]), None);
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        assert_eq!(decode(&[2, 9, 9]), Some((1, 1)));
        assert_eq!(decode(&[0, 1, 9]), Some((255, 2)));
    }
}
