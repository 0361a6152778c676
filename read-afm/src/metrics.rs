//! Scaled text measurement on top of the packed tables.

use afm_types::{CharWidth, UNITS_PER_STEP};

use crate::tables::font::FontMetrics;

/// The number of AFM thousandths in one em.
const UNITS_PER_EM: f32 = 1000.0;

/// Font size in points.
///
/// Sizes here scale the AFM thousandths-of-em values stored in a
/// catalog, so a size of 12.0 turns a width of 1000 thousandths into
/// 12.0 points.
///
/// To retrieve metrics in raw thousandths, use the
/// [unscaled](Self::unscaled) constructor on this type.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct Size(f32);

impl Size {
    /// Creates a new font size from the given value in points.
    ///
    /// Providing a value `<= 0.0` is equivalent to creating an unscaled
    /// size and will result in metrics in AFM thousandths.
    pub fn new(points: f32) -> Self {
        Self(points)
    }

    /// Creates a new font size for producing unscaled metrics in AFM
    /// thousandths.
    pub fn unscaled() -> Self {
        Self(0.0)
    }

    /// Returns the raw size in points.
    ///
    /// Results in `None` if the size is unscaled.
    pub fn points(self) -> Option<f32> {
        (self.0 > 0.0).then_some(self.0)
    }

    /// Computes the scale factor from AFM thousandths to this size.
    ///
    /// Returns 1.0 for an unscaled size.
    pub fn linear_scale(self) -> f32 {
        if self.0 > 0.0 {
            self.0 / UNITS_PER_EM
        } else {
            1.0
        }
    }
}

/// What to charge for a character the font has no width for.
///
/// This covers both code points with no slot at all and slots whose
/// width byte is the reserved missing marker.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum MissingWidth {
    /// Substitute the font's space width.
    #[default]
    SpaceWidth,
    /// Count the character as zero width.
    Zero,
}

/// Text measurement for one font at one size.
///
/// Widths accumulate as integer step counts, with kerning adjustments
/// applied between adjacent pairs, and are scaled to the requested
/// size only once at the end. Measuring the same string therefore
/// always produces the same result, independent of how the text is
/// split up.
#[derive(Debug, Clone)]
pub struct TextMetrics<'a> {
    font: FontMetrics<'a>,
    size: Size,
    missing: MissingWidth,
}

impl<'a> TextMetrics<'a> {
    /// Creates new text metrics for the given font and size.
    ///
    /// Characters without width data are charged the space width; use
    /// [`with_missing_width`](Self::with_missing_width) to change that.
    pub fn new(font: FontMetrics<'a>, size: Size) -> Self {
        TextMetrics {
            font,
            size,
            missing: MissingWidth::default(),
        }
    }

    /// Sets the policy for characters without width data.
    pub fn with_missing_width(mut self, missing: MissingWidth) -> Self {
        self.missing = missing;
        self
    }

    /// The underlying font.
    pub fn font(&self) -> &FontMetrics<'a> {
        &self.font
    }

    /// The size these metrics are scaled to.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The advance width of `text`, with kerning applied between
    /// adjacent character pairs.
    pub fn advance_width(&self, text: &str) -> f32 {
        self.codepoints_width(text.chars().map(u32::from))
    }

    /// The advance width of a sequence of code points.
    ///
    /// Behaves like [`advance_width`](Self::advance_width), for callers
    /// that track code points rather than strings.
    pub fn codepoints_width(&self, codepoints: impl IntoIterator<Item = u32>) -> f32 {
        let mut steps = 0i64;
        let mut prev: Option<u32> = None;
        for codepoint in codepoints {
            steps += self.codepoint_steps(codepoint);
            if let Some(prev) = prev {
                if let Some(kern) = self.font.kerning(prev, codepoint) {
                    steps += kern.steps() as i64;
                }
            }
            prev = Some(codepoint);
        }
        self.scale_steps(steps)
    }

    /// The advance width of a single character.
    pub fn char_width(&self, ch: char) -> f32 {
        self.scale_steps(self.codepoint_steps(ch.into()))
    }

    /// The kerning adjustment applied between a pair of characters,
    /// scaled. Zero when the font stores no pair.
    pub fn kerning(&self, left: char, right: char) -> f32 {
        let steps = self
            .font
            .kerning(left, right)
            .map(|kern| kern.steps() as i64)
            .unwrap_or_default();
        self.scale_steps(steps)
    }

    /// The ascender, scaled.
    pub fn ascent(&self) -> f32 {
        self.font.ascender() as f32 * self.size.linear_scale()
    }

    /// The descender, scaled. Negative, as in the source metrics.
    pub fn descent(&self) -> f32 {
        -(self.font.descender() as f32) * self.size.linear_scale()
    }

    fn codepoint_steps(&self, codepoint: u32) -> i64 {
        match self.font.width(codepoint).and_then(CharWidth::steps) {
            Some(steps) => steps as i64,
            None => self.missing_steps(),
        }
    }

    fn missing_steps(&self) -> i64 {
        match self.missing {
            MissingWidth::SpaceWidth => self
                .font
                .width(' ')
                .and_then(CharWidth::steps)
                .map(|steps| steps as i64)
                .unwrap_or_default(),
            MissingWidth::Zero => 0,
        }
    }

    fn scale_steps(&self, steps: i64) -> f32 {
        steps as f32 * UNITS_PER_STEP * self.size.linear_scale()
    }
}
