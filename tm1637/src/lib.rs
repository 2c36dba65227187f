pub mod display;
pub mod i2c;
pub mod segments;

use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum BusError {
    #[error("I/O error: {0}")]
    Io(std::io::ErrorKind),
    #[error("bus transaction did not complete")]
    Incomplete,
}

impl From<std::io::Error> for BusError {
    fn from(err: std::io::Error) -> Self {
        BusError::Io(err.kind())
    }
}

pub type BusResult<T> = Result<T, BusError>;

/// A single bus transaction following the opcode byte.
///
/// The TM1637 has no address phase: the byte that would normally carry the
/// slave address is parsed as a command opcode, and what follows is either
/// payload bytes or dummy clock cycles depending on the command.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum Transaction<'a> {
    /// Writes the payload bytes after the opcode.
    Write(&'a [u8]),
    /// Reads and discards `len` bytes after the opcode.
    ///
    /// Initialization and brightness commands only latch on a read
    /// transaction. The chip uses the read cycle's rising edge as its commit
    /// signal and needs this many byte-times of clocking to apply the
    /// command; the bytes read back carry no information.
    CommitRead { len: usize },
}

/// Low-level transport for the display controller bus.
///
/// One call performs one transaction: the opcode byte followed by the
/// message described by [Transaction]. Implementations report any I/O or
/// OS-level fault as [BusError]; there is no retrying at this layer.
pub trait BusTransport: Debug {
    fn transfer(&mut self, opcode: u8, transaction: Transaction<'_>) -> BusResult<()>;
}
