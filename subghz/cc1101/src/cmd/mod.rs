//! Header bytes and command strobes
//!
//! Every SPI transaction starts with a header byte:
//!
//! | Bit | Meaning                                  |
//! |-----|------------------------------------------|
//! | 7   | R/W, 1 = read                            |
//! | 6   | Burst access                             |
//! | 5-0 | Register address or strobe command       |
//!
//! The chip returns its status byte while the header is clocked in.

use crate::{regs::RegisterAddress, StatusByte};

mod burst;
mod single;
mod strobe;

pub const SINGLE_WRITE: u8 = 0x00;
pub const BURST_WRITE: u8 = 0x40;
pub const SINGLE_READ: u8 = 0x80;
pub const BURST_READ: u8 = 0xC0;

/// The byte clocked out while reading.
pub const DUMMY: u8 = 0xFF;

pub trait Response {
    fn status_byte(&self) -> StatusByte;
}

const fn header(flags: u8, address: RegisterAddress) -> u8 {
    flags | (address.0 & RegisterAddress::MASK)
}

pub use {
    burst::BurstHeader,
    single::SingleCommand,
    strobe::{Strobe, StrobeCommand},
};
