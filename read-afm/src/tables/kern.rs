//! Shared packed kerning data

use afm_types::{varint, KernValue};

use crate::font_data::FontData;
use crate::read::ReadError;

/// A font's packed kerning array.
///
/// The array holds one sub-list per kerning character, each reachable
/// through a byte offset stored in the font's kerning index. A sub-list
/// is an encoded pair count followed by that many (partner, adjustment)
/// pairs, with the partner code point escape-coded and the adjustment
/// stored as a single signed step byte. Offset zero means "no kerning",
/// so the first byte of a non-empty array is never addressed.
#[derive(Debug, Clone, Copy)]
pub struct KernData<'a> {
    data: FontData<'a>,
}

impl<'a> KernData<'a> {
    pub(crate) fn new(data: FontData<'a>) -> Self {
        KernData { data }
    }

    /// The pairs of the sub-list at `offset`, or `None` for offset zero.
    pub fn pairs(&self, offset: u16) -> Option<KernPairs<'a>> {
        if offset == 0 {
            return None;
        }
        let bytes = self.data.as_bytes().get(offset as usize..)?;
        let (count, used) = varint::decode(bytes)?;
        Some(KernPairs {
            bytes: bytes.get(used..)?,
            remaining: count,
        })
    }

    /// The adjustment for `partner` in the sub-list at `offset`.
    pub fn adjustment(&self, offset: u16, partner: u16) -> Option<KernValue> {
        self.pairs(offset)?
            .find_map(|(candidate, value)| (candidate == partner).then_some(value))
    }

    /// Check that the sub-list at `offset` is decodable end to end.
    pub(crate) fn validate_offset(&self, offset: u16) -> Result<(), ReadError> {
        if offset == 0 {
            return Ok(());
        }
        let bytes = self
            .data
            .as_bytes()
            .get(offset as usize..)
            .ok_or(ReadError::OutOfBounds)?;
        let (count, used) = varint::decode(bytes)
            .ok_or(ReadError::MalformedData("truncated kerning sub-list"))?;
        if count == 0 {
            return Err(ReadError::MalformedData("empty kerning sub-list"));
        }
        let mut rest = bytes
            .get(used..)
            .ok_or(ReadError::MalformedData("truncated kerning sub-list"))?;
        for _ in 0..count {
            let (_, value, remainder) = decode_pair(rest)
                .ok_or(ReadError::MalformedData("truncated kerning sub-list"))?;
            if value.is_zero() {
                return Err(ReadError::MalformedData("kerning adjustment of zero"));
            }
            rest = remainder;
        }
        Ok(())
    }
}

/// An iterator over the (partner, adjustment) pairs of one sub-list.
///
/// Stops early if the underlying bytes run out before the declared
/// pair count is reached.
#[derive(Debug, Clone)]
pub struct KernPairs<'a> {
    bytes: &'a [u8],
    remaining: u16,
}

impl Iterator for KernPairs<'_> {
    type Item = (u16, KernValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.remaining = self.remaining.checked_sub(1)?;
        let (partner, value, rest) = decode_pair(self.bytes)?;
        self.bytes = rest;
        Some((partner, value))
    }
}

fn decode_pair(bytes: &[u8]) -> Option<(u16, KernValue, &[u8])> {
    let (partner, used) = varint::decode(bytes)?;
    let value = KernValue::new(*bytes.get(used)? as i8);
    Some((partner, value, bytes.get(used + 1..)?))
}

#[cfg(test)]
mod tests {
    use afm_test_data::demo;

    use super::*;

    fn demo_kerning() -> KernData<'static> {
        KernData::new(FontData::new(&demo::DEMO_SANS_KERNING))
    }

    #[test]
    fn pairs_for_each_sub_list() {
        let kerning = demo_kerning();
        let a_pairs: Vec<_> = kerning.pairs(demo::DEMO_SANS_KERN_A).unwrap().collect();
        assert_eq!(
            a_pairs,
            vec![
                (86, KernValue::new(-5)),
                (338, KernValue::new(-3)),
                (937, KernValue::new(2)),
            ]
        );
        assert_eq!(kerning.pairs(demo::DEMO_SANS_KERN_V).unwrap().count(), 2);
        assert_eq!(kerning.pairs(demo::DEMO_SANS_KERN_T).unwrap().count(), 3);
    }

    #[test]
    fn offset_zero_means_no_kerning() {
        assert!(demo_kerning().pairs(0).is_none());
        assert!(demo_kerning().adjustment(0, 86).is_none());
    }

    #[test]
    fn adjustment_scans_one_sub_list() {
        let kerning = demo_kerning();
        assert_eq!(
            kerning.adjustment(demo::DEMO_SANS_KERN_A, 86),
            Some(KernValue::new(-5))
        );
        assert_eq!(
            kerning.adjustment(demo::DEMO_SANS_KERN_V, 65),
            Some(KernValue::new(-4))
        );
        // 'V' kerns against 'A' but not the other pairs of 'A'
        assert!(kerning.adjustment(demo::DEMO_SANS_KERN_V, 338).is_none());
        assert!(kerning.adjustment(demo::DEMO_SANS_KERN_A, 87).is_none());
    }

    #[test]
    fn pairs_stop_at_truncated_data() {
        // declares three pairs but only has bytes for one
        let bytes = [0u8, 4, 66, 0xFF];
        let kerning = KernData::new(FontData::new(&bytes));
        let pairs: Vec<_> = kerning.pairs(1).unwrap().collect();
        assert_eq!(pairs, vec![(65, KernValue::new(-1))]);
    }

    #[test]
    fn validate_rejects_bad_sub_lists() {
        let truncated = ReadError::MalformedData("truncated kerning sub-list");
        let bytes = [0u8, 4, 66, 0xFF];
        let kerning = KernData::new(FontData::new(&bytes));
        assert_eq!(kerning.validate_offset(0), Ok(()));
        assert_eq!(kerning.validate_offset(1), Err(truncated.clone()));
        assert_eq!(kerning.validate_offset(4), Err(truncated.clone()));
        assert_eq!(kerning.validate_offset(5), Err(ReadError::OutOfBounds));

        let zero_count = [0u8, 1, 0, 0];
        let kerning = KernData::new(FontData::new(&zero_count));
        assert_eq!(
            kerning.validate_offset(1),
            Err(ReadError::MalformedData("empty kerning sub-list"))
        );

        let zero_delta = [0u8, 2, 66, 0];
        let kerning = KernData::new(FontData::new(&zero_delta));
        assert_eq!(
            kerning.validate_offset(1),
            Err(ReadError::MalformedData("kerning adjustment of zero"))
        );

        assert_eq!(demo_kerning().validate_offset(demo::DEMO_SANS_KERN_A), Ok(()));
    }
}
