//! Quantized width and kerning units.

/// AFM thousandths-of-em per stored width step.
///
/// AFM expresses advance widths as integers with 1000 representing one
/// em at the current font size. Width bytes and kerning deltas here are
/// quantized to steps of 1000/6 thousandths, which keeps every typical
/// Latin width inside a byte at a precision cost below half a percent.
pub const UNITS_PER_STEP: f32 = 1000.0 / 6.0;

/// A quantized character advance width.
///
/// Stored as a count of [`UNITS_PER_STEP`] units. The all-ones byte is
/// reserved to mark characters with no width data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharWidth(u8);

impl CharWidth {
    /// The reserved marker for "no width data stored".
    pub const MISSING: CharWidth = CharWidth(0xFF);

    /// The largest representable width, in steps.
    pub const MAX_STEPS: u8 = 0xFE;

    /// Construct a width from a raw step count.
    ///
    /// A `steps` value of `0xFF` yields [`MISSING`].
    pub const fn new(steps: u8) -> Self {
        CharWidth(steps)
    }

    /// Quantize a width given in AFM thousandths.
    ///
    /// Rounds to the nearest step and saturates at [`MAX_STEPS`], so
    /// the result is never [`MISSING`].
    pub fn from_units(units: f32) -> Self {
        let steps = (units / UNITS_PER_STEP + 0.5) as i32;
        if steps <= 0 {
            CharWidth(0)
        } else if steps >= Self::MAX_STEPS as i32 {
            CharWidth(Self::MAX_STEPS)
        } else {
            CharWidth(steps as u8)
        }
    }

    /// The raw step count, or `None` for [`MISSING`].
    pub const fn steps(self) -> Option<u8> {
        if self.is_missing() {
            None
        } else {
            Some(self.0)
        }
    }

    /// The width in AFM thousandths, or `None` for [`MISSING`].
    pub fn units(self) -> Option<f32> {
        match self.steps() {
            Some(steps) => Some(steps as f32 * UNITS_PER_STEP),
            None => None,
        }
    }

    /// `true` if this is the reserved missing marker.
    pub const fn is_missing(self) -> bool {
        self.0 == Self::MISSING.0
    }

    /// The raw byte as stored in a width array.
    pub const fn to_byte(self) -> u8 {
        self.0
    }
}

impl Default for CharWidth {
    fn default() -> Self {
        CharWidth::MISSING
    }
}

/// A quantized kerning adjustment.
///
/// Stored as a signed count of [`UNITS_PER_STEP`] units; negative
/// values pull a pair closer together. A zero adjustment is never
/// stored in a packed table, since it has no effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KernValue(i8);

impl KernValue {
    /// Construct a kerning value from a raw step count.
    pub const fn new(steps: i8) -> Self {
        KernValue(steps)
    }

    /// Quantize an adjustment given in AFM thousandths.
    ///
    /// Rounds to the nearest step and saturates at the `i8` range.
    pub fn from_units(units: f32) -> Self {
        let scaled = units / UNITS_PER_STEP;
        let steps = if scaled >= 0.0 {
            (scaled + 0.5) as i32
        } else {
            (scaled - 0.5) as i32
        };
        KernValue(steps.clamp(i8::MIN as i32, i8::MAX as i32) as i8)
    }

    /// The raw step count.
    pub const fn steps(self) -> i8 {
        self.0
    }

    /// The adjustment in AFM thousandths.
    pub fn units(self) -> f32 {
        self.0 as f32 * UNITS_PER_STEP
    }

    /// `true` if this adjustment has no effect.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}
