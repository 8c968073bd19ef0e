use core::slice;

use crate::{regs::RegisterAddress, StatusByte};

use super::{header, Response, BURST_READ, BURST_WRITE};

/// The header byte that starts a burst access.
///
/// Register bursts auto-increment the address, FIFO bursts keep reading or writing the FIFO.
pub struct BurstHeader(u8);

impl BurstHeader {
    pub const fn read(first: RegisterAddress) -> Self {
        Self(header(BURST_READ, first))
    }

    pub const fn write(first: RegisterAddress) -> Self {
        assert!(!first.is_status(), "status registers are read only");
        Self(header(BURST_WRITE, first))
    }

    pub const fn read_fifo() -> Self {
        Self::read(RegisterAddress::FIFO)
    }

    pub const fn write_fifo() -> Self {
        Self::write(RegisterAddress::FIFO)
    }
}

impl Response for BurstHeader {
    fn status_byte(&self) -> StatusByte {
        StatusByte(self.0)
    }
}

impl AsRef<[u8]> for BurstHeader {
    fn as_ref(&self) -> &[u8] {
        slice::from_ref(&self.0)
    }
}

impl AsMut<[u8]> for BurstHeader {
    fn as_mut(&mut self) -> &mut [u8] {
        slice::from_mut(&mut self.0)
    }
}
