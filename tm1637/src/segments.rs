//! Segment masks and digit glyphs.
//!
//! Each display position is one byte, one bit per LED:
//!
//! ```text
//!  --a--
//! |     |
//! f     b
//! |     |
//!  --g--
//! |     |
//! e     c
//! |     |
//!  --d--   (dp)
//! ```
//!
//! Bit 7 is segment A down to bit 1 for segment G; bit 0 is the decimal
//! point. Masks compose with `|`, so `DIGITS[4] | SEGMENT_DECIMAL_POINT`
//! lights the digit 4 together with its decimal point.

pub const SEGMENT_A: u8 = 0b1000_0000;
pub const SEGMENT_B: u8 = 0b0100_0000;
pub const SEGMENT_C: u8 = 0b0010_0000;
pub const SEGMENT_D: u8 = 0b0001_0000;
pub const SEGMENT_E: u8 = 0b0000_1000;
pub const SEGMENT_F: u8 = 0b0000_0100;
pub const SEGMENT_G: u8 = 0b0000_0010;
pub const SEGMENT_DECIMAL_POINT: u8 = 0b0000_0001;

/// All segments off.
pub const BLANK: u8 = 0x00;

/// Glyphs for the decimal digits 0-9, decimal point clear.
pub const DIGITS: [u8; 10] = [
    0xFC, 0x60, 0xDA, 0xF2, 0x66, 0xB6, 0xBE, 0xE0, 0xFE, 0xF6,
];
