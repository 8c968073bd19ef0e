use bitfield::bitfield;
use num_traits::FromPrimitive;

bitfield! {
    /// The status byte sent over SPI while the header byte or a command strobe is sent.
    #[derive(Clone, Copy, PartialEq)]
    pub struct StatusByte(u8);
    /// Stays high until power and crystal have stabilized. Should always be low when using the SPI interface.
    pub chip_rdyn, _: 7;
    /// Indicates the current main state machine mode.
    state_bits, _: 6, 4;
    /// Bytes available in the RX FIFO on reads, or free bytes in the TX FIFO on writes (saturates at 15).
    pub fifo_bytes_available, _: 3, 0;
}

impl core::fmt::Debug for StatusByte {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("StatusByte").field(&self.0).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusByte {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "StatusByte({=u8:#x})", self.0)
    }
}

/// Coarse transceiver state.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    IDLE = 0b000,
    RX = 0b001,
    TX = 0b010,
    FSTXON = 0b011,
    CALIBRATE = 0b100,
    SETTLING = 0b101,
    RXFIFO_OVERFLOW = 0b110,
    TXFIFO_UNDERFLOW = 0b111,
    /// The chip reported that it is not ready (CHIP_RDYn set).
    FAILED,
}

impl StatusByte {
    /// Decode the state. A set CHIP_RDYn bit is reported as [`State::FAILED`] regardless of the state bits.
    pub fn state(self) -> State {
        if self.chip_rdyn() {
            State::FAILED
        } else {
            State::from_u8(self.state_bits()).unwrap_or(State::FAILED)
        }
    }

    /// true if the chip is ready, false otherwise
    pub fn chip_rdy(self) -> bool {
        !self.chip_rdyn()
    }
}
