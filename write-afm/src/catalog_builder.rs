//! A builder for complete metrics catalogs

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::tables::catalog::Catalog;
use crate::tables::font::Font;
use crate::validate::{Validate, ValidationReport};
use crate::write::dump_table;

/// Build a packed catalog from some set of fonts.
///
/// Fonts are keyed by full name, so they can be added in any order and
/// the sorted layout the format requires falls out of the map.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    fonts: BTreeMap<String, Font>,
}

/// An error returned when attempting to add a font to the builder.
///
/// This wraps a validation report, adding the full name of the font
/// where it was encountered.
#[derive(Debug)]
#[non_exhaustive]
pub struct BuilderError {
    /// The full name of the font where the error occurred
    pub full_name: String,
    /// The underlying report
    pub inner: ValidationReport,
}

impl CatalogBuilder {
    /// Create a new builder to compile a packed catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a font to the builder.
    ///
    /// The font is validated immediately and returned as an error if it
    /// is malformed. Adding a font with the same full name as an
    /// existing one replaces it.
    pub fn add_font(&mut self, font: Font) -> Result<&mut Self, BuilderError> {
        if let Err(inner) = font.validate() {
            return Err(BuilderError {
                full_name: font.full_name,
                inner,
            });
        }
        if self.fonts.contains_key(&font.full_name) {
            log::warn!("replacing existing font '{}'", font.full_name);
        }
        self.fonts.insert(font.full_name.clone(), font);
        Ok(self)
    }

    /// Returns `true` if the builder contains a font with this full name.
    pub fn contains(&self, full_name: &str) -> bool {
        self.fonts.contains_key(full_name)
    }

    /// The number of fonts currently in the builder.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Returns `true` if no fonts have been added.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Assemble the fonts into the bytes of a packed catalog.
    pub fn build(&self) -> Result<Vec<u8>, ValidationReport> {
        let catalog = Catalog::new(self.fonts.values().cloned().collect());
        let data = dump_table(&catalog)?;
        log::debug!(
            "compiled catalog: {} fonts, {} bytes",
            catalog.fonts.len(),
            data.len()
        );
        Ok(data)
    }
}

impl Display for BuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to add font '{}': {}", self.full_name, self.inner)
    }
}

impl std::error::Error for BuilderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}
