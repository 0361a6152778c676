//! An editable catalog of font records

use afm_types::{FixedSize, CATALOG_VERSION};

use crate::tables::font::Font;
use crate::validate::{Validate, ValidationCtx, ValidationReport};
use crate::write::{dump_table, FontWrite, TableWriter};

/// An ordered collection of fonts, the root table of the packed format.
///
/// Fonts must be sorted by full name, without duplicates, before the
/// catalog can be compiled; [`sort`](Self::sort) puts an arbitrary
/// collection into that order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    /// The font records, sorted by full name.
    pub fonts: Vec<Font>,
}

impl Catalog {
    /// Create a new catalog from a collection of fonts.
    pub fn new(fonts: Vec<Font>) -> Self {
        Catalog { fonts }
    }

    /// Sort the fonts into the name order the packed format requires.
    ///
    /// Duplicate names are not resolved here; they are reported by
    /// validation.
    pub fn sort(&mut self) {
        self.fonts.sort_by(|a, b| a.full_name.cmp(&b.full_name));
    }

    /// Validate the catalog and compile it to its packed binary form.
    pub fn build(&self) -> Result<Vec<u8>, ValidationReport> {
        dump_table(self)
    }
}

impl Validate for Catalog {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Catalog", |ctx| {
            ctx.in_field("fonts", |ctx| {
                if self.fonts.len() > u16::MAX as usize {
                    ctx.report("more fonts than a count field can hold");
                }
                if self
                    .fonts
                    .windows(2)
                    .any(|window| window[0].full_name >= window[1].full_name)
                {
                    ctx.report("fonts must be sorted by full name, without duplicates");
                }
                self.fonts.validate_impl(ctx);
            });
        })
    }
}

impl FontWrite for Catalog {
    fn write_into(&self, writer: &mut TableWriter) {
        let records: Vec<Vec<u8>> = self
            .fonts
            .iter()
            .map(|font| {
                let mut record = TableWriter::default();
                font.write_into(&mut record);
                record.into_data()
            })
            .collect();
        CATALOG_VERSION.write_into(writer);
        (self.fonts.len() as u16).write_into(writer);
        let data_start =
            (u32::RAW_BYTE_LEN + u16::RAW_BYTE_LEN + records.len() * u32::RAW_BYTE_LEN) as u32;
        let mut offset = data_start;
        for record in &records {
            offset.write_into(writer);
            offset += record.len() as u32;
        }
        debug_assert_eq!(writer.position() as u32, data_start);
        for record in &records {
            writer.write_slice(record);
        }
    }
}
