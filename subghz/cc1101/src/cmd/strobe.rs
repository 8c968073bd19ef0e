use core::slice;

use crate::StatusByte;

use super::Response;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Strobe {
    /// Reset chip
    SRES = 0x30,
    /// Enable and calibrate frequency synthesizer
    SFSTXON = 0x31,
    /// Turn off crystal oscillator
    SXOFF = 0x32,
    /// Calibrate frequency synthesizer and turn it off
    SCAL = 0x33,
    /// Enable RX
    SRX = 0x34,
    /// Enable TX
    STX = 0x35,
    /// Exit RX/TX and turn off frequency synthesizer
    SIDLE = 0x36,
    /// Start automatic RX polling sequence (Wake-on-Radio)
    SWOR = 0x38,
    /// Enter power down mode when CSn goes high
    SPWD = 0x39,
    /// Flush the RX FIFO
    SFRX = 0x3A,
    /// Flush the TX FIFO
    SFTX = 0x3B,
    /// Reset real time clock
    SWORRST = 0x3C,
    /// No operation - may be used to get access to the chip status byte
    SNOP = 0x3D,
}

pub struct StrobeCommand(u8);

impl StrobeCommand {
    pub const fn new(strobe: Strobe) -> Self {
        Self(strobe as u8)
    }
}

impl Response for StrobeCommand {
    fn status_byte(&self) -> StatusByte {
        StatusByte(self.0)
    }
}

impl AsRef<[u8]> for StrobeCommand {
    fn as_ref(&self) -> &[u8] {
        slice::from_ref(&self.0)
    }
}

impl AsMut<[u8]> for StrobeCommand {
    fn as_mut(&mut self) -> &mut [u8] {
        slice::from_mut(&mut self.0)
    }
}
