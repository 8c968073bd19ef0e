use num_traits::FromPrimitive;

/// Main radio control state machine state, as reported by the MARCSTATE status register.
#[derive(Debug, Clone, Copy, PartialEq, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(non_camel_case_types)]
pub enum MarcState {
    SLEEP = 0x00,
    IDLE = 0x01,
    XOFF = 0x02,
    VCOON_MC = 0x03,
    REGON_MC = 0x04,
    MANCAL = 0x05,
    VCOON = 0x06,
    REGON = 0x07,
    STARTCAL = 0x08,
    BWBOOST = 0x09,
    FS_LOCK = 0x0A,
    IFADCON = 0x0B,
    ENDCAL = 0x0C,
    RX = 0x0D,
    RX_END = 0x0E,
    RX_RST = 0x0F,
    TXRX_SWITCH = 0x10,
    RXFIFO_OVERFLOW = 0x11,
    FSTXON = 0x12,
    TX = 0x13,
    TX_END = 0x14,
    RXTX_SWITCH = 0x15,
    TXFIFO_UNDERFLOW = 0x16,
}

impl MarcState {
    /// Decode the MARCSTATE register value. Only the five low bits are defined.
    pub fn from_register(value: u8) -> Option<Self> {
        Self::from_u8(value & 0x1F)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_decode() {
        assert_eq!(Some(MarcState::SLEEP), MarcState::from_register(0x00));
        assert_eq!(Some(MarcState::RX), MarcState::from_register(0x0D));
        assert_eq!(Some(MarcState::RX), MarcState::from_register(0xED));
        assert_eq!(
            Some(MarcState::TXFIFO_UNDERFLOW),
            MarcState::from_register(0x16)
        );
        assert_eq!(None, MarcState::from_register(0x17));
    }
}
