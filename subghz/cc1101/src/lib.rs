#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

extern crate bitfield;

#[macro_use]
extern crate num_derive;

pub mod cmd;
mod config;
pub mod configs;
mod driver;
mod error;
mod packet;
pub mod regs;
mod statusbyte;
mod transceiver;

/// Size of both the TX and the RX FIFO.
pub const FIFO_LEN: usize = 64;
/// Bytes available for address and payload in a frame.
pub const MAX_DATA_LEN: usize = FIFO_LEN - 2;
/// Largest payload that still leaves room for the appended RSSI and LQI/CRC bytes.
pub const MAX_PAYLOAD: usize = MAX_DATA_LEN - 2;

/// The address that every node accepts when address filtering is enabled.
pub const BROADCAST_ADDRESS: u8 = 0;

pub type Rssi = i8;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PartNumber {
    pub partnum: u8,
    pub version: u8,
}

pub use self::{
    cmd::Strobe,
    config::{Config, ConfigPatch, ConfigTable},
    driver::{Driver, DEFAULT_READY_TIMEOUT_US},
    error::DriverError,
    packet::{Packet, RxInfo, RxPacket},
    regs::MarcState,
    statusbyte::{State, StatusByte},
    transceiver::Transceiver,
};
