//! Register map
//!
//! The configuration registers occupy `0x00..=0x2E` and are accessed with single or burst
//! read/write headers. The status registers at `0x30..=0x3D` share their addresses with the
//! command strobes and can only be reached with the burst bit set on a read.

use bitfield::bitfield;

mod marc_state;

pub use marc_state::MarcState;

/// The six bit register address that is combined with the read and burst flags to form the header byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterAddress(pub u8);

impl RegisterAddress {
    pub const MASK: u8 = 0x3F;

    // Configuration registers
    pub const IOCFG2: Self = Self(0x00);
    pub const IOCFG1: Self = Self(0x01);
    pub const IOCFG0: Self = Self(0x02);
    pub const FIFOTHR: Self = Self(0x03);
    pub const SYNC1: Self = Self(0x04);
    pub const SYNC0: Self = Self(0x05);
    pub const PKTLEN: Self = Self(0x06);
    pub const PKTCTRL1: Self = Self(0x07);
    pub const PKTCTRL0: Self = Self(0x08);
    pub const ADDR: Self = Self(0x09);
    pub const CHANNR: Self = Self(0x0A);
    pub const FSCTRL1: Self = Self(0x0B);
    pub const FSCTRL0: Self = Self(0x0C);
    pub const FREQ2: Self = Self(0x0D);
    pub const FREQ1: Self = Self(0x0E);
    pub const FREQ0: Self = Self(0x0F);
    pub const MDMCFG4: Self = Self(0x10);
    pub const MDMCFG3: Self = Self(0x11);
    pub const MDMCFG2: Self = Self(0x12);
    pub const MDMCFG1: Self = Self(0x13);
    pub const MDMCFG0: Self = Self(0x14);
    pub const DEVIATN: Self = Self(0x15);
    pub const MCSM2: Self = Self(0x16);
    pub const MCSM1: Self = Self(0x17);
    pub const MCSM0: Self = Self(0x18);
    pub const FOCCFG: Self = Self(0x19);
    pub const BSCFG: Self = Self(0x1A);
    pub const AGCCTRL2: Self = Self(0x1B);
    pub const AGCCTRL1: Self = Self(0x1C);
    pub const AGCCTRL0: Self = Self(0x1D);
    pub const WOREVT1: Self = Self(0x1E);
    pub const WOREVT0: Self = Self(0x1F);
    pub const WORCTRL: Self = Self(0x20);
    pub const FREND1: Self = Self(0x21);
    pub const FREND0: Self = Self(0x22);
    pub const FSCAL3: Self = Self(0x23);
    pub const FSCAL2: Self = Self(0x24);
    pub const FSCAL1: Self = Self(0x25);
    pub const FSCAL0: Self = Self(0x26);
    pub const RCCTRL1: Self = Self(0x27);
    pub const RCCTRL0: Self = Self(0x28);
    pub const FSTEST: Self = Self(0x29);
    pub const PTEST: Self = Self(0x2A);
    pub const AGCTEST: Self = Self(0x2B);
    pub const TEST2: Self = Self(0x2C);
    pub const TEST1: Self = Self(0x2D);
    pub const TEST0: Self = Self(0x2E);

    // Status registers (read only)
    pub const PARTNUM: Self = Self(0x30);
    pub const VERSION: Self = Self(0x31);
    pub const FREQEST: Self = Self(0x32);
    pub const LQI: Self = Self(0x33);
    pub const RSSI: Self = Self(0x34);
    pub const MARCSTATE: Self = Self(0x35);
    pub const WORTIME1: Self = Self(0x36);
    pub const WORTIME0: Self = Self(0x37);
    pub const PKTSTATUS: Self = Self(0x38);
    pub const VCO_VC_DAC: Self = Self(0x39);
    pub const TXBYTES: Self = Self(0x3A);
    pub const RXBYTES: Self = Self(0x3B);
    pub const RCCTRL1_STATUS: Self = Self(0x3C);
    pub const RCCTRL0_STATUS: Self = Self(0x3D);

    /// Power amplifier table, single access writes entry 0.
    pub const PATABLE: Self = Self(0x3E);
    pub const FIFO: Self = Self(0x3F);

    /// true if this is one of the read-only status registers.
    pub const fn is_status(&self) -> bool {
        self.0 >= Self::PARTNUM.0 && self.0 <= Self::RCCTRL0_STATUS.0
    }

    /// Number of registers in the contiguous block `self..=last`.
    pub const fn span(&self, last: RegisterAddress) -> usize {
        (last.0 - self.0) as usize + 1
    }
}

bitfield! {
    /// RXBYTES status register.
    #[derive(Clone, Copy)]
    pub struct RxBytes(u8);
    /// The RX FIFO has overflowed.
    pub rxfifo_overflow, _: 7;
    /// Number of bytes in the RX FIFO.
    pub num_rxbytes, _: 6, 0;
}

bitfield! {
    /// TXBYTES status register.
    #[derive(Clone, Copy)]
    pub struct TxBytes(u8);
    /// The TX FIFO has underflowed.
    pub txfifo_underflow, _: 7;
    /// Number of bytes in the TX FIFO.
    pub num_txbytes, _: 6, 0;
}

#[cfg(feature = "defmt")]
impl defmt::Format for RxBytes {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "RxBytes {{ overflow: {=bool}, bytes: {=u8} }}",
            self.rxfifo_overflow(),
            self.num_rxbytes()
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TxBytes {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "TxBytes {{ underflow: {=bool}, bytes: {=u8} }}",
            self.txfifo_underflow(),
            self.num_txbytes()
        )
    }
}
