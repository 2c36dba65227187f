//! Linux i2c-dev transport.
//!
//! The TM1637 ignores I²C addressing, so the command opcode travels in the
//! address field of an `I2C_RDWR` message. The ioctl is issued directly via
//! `libc` rather than through an i2c client library: client libraries
//! validate slave addresses against the reserved ranges, and the level-6
//! brightness opcode (`0x78`) falls inside one.

use crate::{BusError, BusResult, BusTransport, Transaction};
use log::trace;
use std::fmt::{Debug, Formatter};
use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::path::Path;

const I2C_RDWR: libc::c_ulong = 0x0707;
const I2C_M_RD: u16 = 0x0001;

/// Mirrors `struct i2c_msg` from `<linux/i2c.h>`.
#[repr(C)]
struct I2cMsg {
    addr: u16,
    flags: u16,
    len: u16,
    buf: *mut u8,
}

/// Mirrors `struct i2c_rdwr_ioctl_data` from `<linux/i2c-dev.h>`.
#[repr(C)]
struct I2cRdwrIoctlData {
    msgs: *mut I2cMsg,
    nmsgs: u32,
}

/// [BusTransport] over a Linux i2c-dev character device.
pub struct I2cDev {
    file: File,
    path: String,
}

impl I2cDev {
    /// Opens the i2c-dev device at `path`, e.g. `/dev/i2c-1`.
    pub fn open(path: impl AsRef<Path>) -> BusResult<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(I2cDev {
            file,
            path: path.display().to_string(),
        })
    }

    fn rdwr(&mut self, msg: &mut I2cMsg) -> BusResult<()> {
        let mut data = I2cRdwrIoctlData { msgs: msg, nmsgs: 1 };
        let ret = unsafe { libc::ioctl(self.file.as_raw_fd(), I2C_RDWR, &mut data) };
        if ret < 0 {
            return Err(std::io::Error::last_os_error().into());
        }
        // I2C_RDWR returns the number of messages transferred.
        if ret != 1 {
            return Err(BusError::Incomplete);
        }
        Ok(())
    }
}

impl Debug for I2cDev {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "I2cDev({})", self.path)
    }
}

impl BusTransport for I2cDev {
    fn transfer(&mut self, opcode: u8, transaction: Transaction<'_>) -> BusResult<()> {
        match transaction {
            Transaction::Write(payload) => {
                trace!("Write {:#04x}: {:02x?}", opcode, payload);
                let mut buf = payload.to_vec();
                let mut msg = I2cMsg {
                    addr: opcode as u16,
                    flags: 0,
                    len: buf.len() as u16,
                    buf: buf.as_mut_ptr(),
                };
                self.rdwr(&mut msg)
            }
            Transaction::CommitRead { len } => {
                trace!("Commit read {:#04x}: {} dummy bytes", opcode, len);
                // The content read back is discarded; the transaction only
                // exists to clock the chip's commit edge.
                let mut buf = vec![0u8; len];
                let mut msg = I2cMsg {
                    addr: opcode as u16,
                    flags: I2C_M_RD,
                    len: buf.len() as u16,
                    buf: buf.as_mut_ptr(),
                };
                self.rdwr(&mut msg)
            }
        }
    }
}
