//! TM1637 display driver.
//!
//! The TM1637 scans up to six 7-segment positions; the common 4-digit clock
//! modules wire the first four and route the middle colon to the decimal
//! point of the second position. The chip sits on a bus that is electrically
//! I²C but ignores addressing: the byte that would carry the slave address
//! is parsed as a command opcode instead (least significant bit first on the
//! wire).
//!
//! Two quirks shape this driver:
//!
//! - Initialization and brightness commands only take effect on a *read*
//!   transaction. The chip uses the read cycle's rising edge as its commit
//!   signal and needs about six byte-times of clocking, so those commands go
//!   out as [Transaction::CommitRead] with a six-byte dummy read.
//! - The same commands reset every display register to `0xFF` (all segments
//!   lit). The driver keeps the last written pattern and transparently
//!   rewrites it after each brightness change.

use crate::segments::{BLANK, DIGITS, SEGMENT_DECIMAL_POINT};
use crate::{BusResult, BusTransport, Transaction};
use log::debug;

/// Opcode for writing the display registers.
const DISPLAY_WRITE: u8 = 0x40;
/// Control-mode bit. Combined with a level encoding it forms a brightness
/// command; on its own (the level-1 encoding is zero) it is the init command.
const CONTROL: u8 = 0x08;
/// Dummy bytes to read while the chip latches a control command.
const LATCH_CLOCKS: usize = 6;
/// Display registers on the chip. Only the first four are wired on this
/// module, so writes pad the rest with zeros.
const REGISTERS: usize = 6;

/// One of the chip's six pulse-width brightness settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Brightness {
    /// Dimmest level; the power-on default.
    #[default]
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
    /// Brightest level.
    Level6,
}

impl Brightness {
    /// Gets the brightness for a numeric level 1 (dimmest) to 6 (brightest).
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Brightness::Level1),
            2 => Some(Brightness::Level2),
            3 => Some(Brightness::Level3),
            4 => Some(Brightness::Level4),
            5 => Some(Brightness::Level5),
            6 => Some(Brightness::Level6),
            _ => None,
        }
    }

    /// The chip's pulse-width encoding for this level.
    pub fn encoding(&self) -> u8 {
        match self {
            Brightness::Level1 => 0x00,
            Brightness::Level2 => 0x40,
            Brightness::Level3 => 0x20,
            Brightness::Level4 => 0x60,
            Brightness::Level5 => 0x50,
            Brightness::Level6 => 0x70,
        }
    }

    fn command(&self) -> u8 {
        self.encoding() | CONTROL
    }
}

/// Driver for a 4-digit TM1637 display module.
///
/// Owns its [BusTransport] exclusively. The chip has no transaction framing
/// to disambiguate interleaved commands, so calls must not be issued from
/// multiple threads without external synchronization.
#[derive(Debug)]
pub struct Tm1637<B: BusTransport> {
    bus: B,
    digits: [u8; 4],
    brightness: Brightness,
}

impl<B: BusTransport> Tm1637<B> {
    /// Initializes the display on `bus`.
    ///
    /// The init command forces every display register to `0xFF` (all
    /// segments and decimal points lit) and the chip comes up at the dimmest
    /// level; the returned driver's state reflects both.
    pub fn new(bus: B) -> BusResult<Self> {
        let mut display = Tm1637 {
            bus,
            digits: [0xFF; 4],
            brightness: Brightness::default(),
        };
        debug!("Initializing {:?}", display.bus);
        display.bus.transfer(
            display.brightness.command(),
            Transaction::CommitRead { len: LATCH_CLOCKS },
        )?;
        Ok(display)
    }

    /// Sets the display brightness.
    ///
    /// The brightness command resets the chip's display registers as a side
    /// effect, so the last written pattern is rewritten right after. If that
    /// rewrite fails, the new brightness has already latched on the hardware
    /// and stays recorded here; the error is still returned.
    pub fn set_brightness(&mut self, level: Brightness) -> BusResult<()> {
        debug!("Setting brightness to {:?}", level);
        self.brightness = level;
        self.bus
            .transfer(level.command(), Transaction::CommitRead { len: LATCH_CLOCKS })?;
        // Bring back the content the control command just wiped.
        self.display(self.digits)
    }

    /// Sets the four display positions to raw segment masks.
    ///
    /// Masks come from [crate::segments]: digit glyphs, `SEGMENT_*` bits, or
    /// any OR of them. The colon in the middle of the module is the decimal
    /// point of the second position; OR
    /// [SEGMENT_DECIMAL_POINT](crate::segments::SEGMENT_DECIMAL_POINT) into
    /// `digits[1]` to light it.
    ///
    /// The stored pattern is updated alongside issuing the transfer, so
    /// after a failed call it reflects the attempted content, not whatever
    /// the hardware was left showing.
    pub fn display(&mut self, digits: [u8; 4]) -> BusResult<()> {
        self.digits = digits;
        let mut payload = [BLANK; REGISTERS];
        payload[..digits.len()].copy_from_slice(&digits);
        self.bus
            .transfer(DISPLAY_WRITE, Transaction::Write(&payload))
    }

    /// Shows an integer across the four positions.
    ///
    /// Only the magnitude is displayed. Values above 9999 keep their last
    /// four digits, and shorter values get leading zeros. `colon` lights the
    /// separator between the digit pairs.
    pub fn show_number(&mut self, number: i32, colon: bool) -> BusResult<()> {
        let magnitude = number.unsigned_abs();

        let thousands = DIGITS[(magnitude / 1000 % 10) as usize];
        let mut hundreds = DIGITS[(magnitude / 100 % 10) as usize];
        let tens = DIGITS[(magnitude / 10 % 10) as usize];
        let ones = DIGITS[(magnitude % 10) as usize];

        if colon {
            hundreds |= SEGMENT_DECIMAL_POINT;
        }

        self.display([thousands, hundreds, tens, ones])
    }

    /// Blanks all four positions.
    pub fn clear(&mut self) -> BusResult<()> {
        self.display([BLANK; 4])
    }

    /// The last pattern written to the display.
    pub fn digits(&self) -> [u8; 4] {
        self.digits
    }

    /// The current brightness level.
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Releases the underlying bus transport.
    pub fn release(self) -> B {
        self.bus
    }
}
