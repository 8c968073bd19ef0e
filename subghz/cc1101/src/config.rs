use crate::regs::RegisterAddress;

/// Registers PKTCTRL1 ..= DEVIATN.
const PACKET_MODEM_LEN: usize = 15;
/// Registers MCSM0 ..= AGCCTRL0.
const CONTROL_AGC_LEN: usize = 6;
/// Registers FREND1 ..= FSCAL0.
const FRONTEND_CAL_LEN: usize = 6;

/// Values for a contiguous block of registers starting at `first`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigPatch<'a> {
    pub first: RegisterAddress,
    pub values: &'a [u8],
}

impl<'a> ConfigPatch<'a> {
    /// Get a register value, or None if the register is not part of the patch.
    pub const fn get(&self, address: RegisterAddress) -> Option<u8> {
        if address.0 < self.first.0 {
            return None;
        }
        let index = (address.0 - self.first.0) as usize;
        if index < self.values.len() {
            Some(self.values[index])
        } else {
            None
        }
    }

    /// The last register covered by the patch.
    pub const fn last(&self) -> RegisterAddress {
        RegisterAddress(self.first.0 + self.values.len() as u8 - 1)
    }
}

/// A radio profile as exported from SmartRF Studio.
///
/// The chip register map has gaps between the blocks, so the profile is written as three bursts:
///
/// | Block | Registers              | Length |
/// |-------|------------------------|--------|
/// | 1     | PKTCTRL1 ..= DEVIATN   | 15     |
/// | 2     | MCSM0 ..= AGCCTRL0     | 6      |
/// | 3     | FREND1 ..= FSCAL0      | 6      |
///
/// ADDR and CHANNR fall inside the first block and are overwritten by [`Config`] afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigTable<'a> {
    packet_modem: &'a [u8; PACKET_MODEM_LEN],
    control_agc: &'a [u8; CONTROL_AGC_LEN],
    frontend_cal: &'a [u8; FRONTEND_CAL_LEN],
}

impl<'a> ConfigTable<'a> {
    pub const PACKET_MODEM_LEN: usize = PACKET_MODEM_LEN;
    pub const CONTROL_AGC_LEN: usize = CONTROL_AGC_LEN;
    pub const FRONTEND_CAL_LEN: usize = FRONTEND_CAL_LEN;

    pub const fn new(
        packet_modem: &'a [u8; PACKET_MODEM_LEN],
        control_agc: &'a [u8; CONTROL_AGC_LEN],
        frontend_cal: &'a [u8; FRONTEND_CAL_LEN],
    ) -> Self {
        Self {
            packet_modem,
            control_agc,
            frontend_cal,
        }
    }

    /// The three patches in the order they must be written.
    pub const fn patches(&self) -> [ConfigPatch<'a>; 3] {
        [
            ConfigPatch {
                first: RegisterAddress::PKTCTRL1,
                values: self.packet_modem,
            },
            ConfigPatch {
                first: RegisterAddress::MCSM0,
                values: self.control_agc,
            },
            ConfigPatch {
                first: RegisterAddress::FREND1,
                values: self.frontend_cal,
            },
        ]
    }

    /// Get a register value from the table, or None if the table does not cover the register.
    pub fn get(&self, address: RegisterAddress) -> Option<u8> {
        self.patches()
            .iter()
            .find_map(|patch| patch.get(address))
    }
}

/// Network identity and radio parameters applied on top of a [`ConfigTable`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config<'a> {
    pub table: ConfigTable<'a>,
    /// Acts like a network id - all nodes must use exactly the same sync word.
    pub sync: u16,
    /// The listening address.
    pub address: u8,
    /// The channel number.
    pub channel: u8,
    /// The PATABLE entry used for output power.
    pub tx_power: u8,
}

impl<'a> Config<'a> {
    pub const DEFAULT_ADDRESS: u8 = crate::BROADCAST_ADDRESS;
    /// 400MHz + 165 * 200kHz = 433MHz with the bundled profile.
    pub const DEFAULT_CHANNEL: u8 = 165;
    pub const DEFAULT_TX_POWER: u8 = 0xC6;

    pub const fn new(sync: u16, table: ConfigTable<'a>) -> Self {
        Self {
            table,
            sync,
            address: Self::DEFAULT_ADDRESS,
            channel: Self::DEFAULT_CHANNEL,
            tx_power: Self::DEFAULT_TX_POWER,
        }
    }

    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub const fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    pub const fn with_tx_power(mut self, tx_power: u8) -> Self {
        self.tx_power = tx_power;
        self
    }

    pub const fn sync1(&self) -> u8 {
        (self.sync >> 8) as u8
    }

    pub const fn sync0(&self) -> u8 {
        (self.sync & 0xFF) as u8
    }
}

#[cfg(test)]
mod tests {
    use crate::configs::GFSK_1K2_433;

    use super::*;

    #[test]
    fn patches_follow_register_map() {
        let [first, second, third] = GFSK_1K2_433.patches();

        assert_eq!(RegisterAddress::PKTCTRL1, first.first);
        assert_eq!(RegisterAddress::DEVIATN, first.last());
        assert_eq!(RegisterAddress::MCSM0, second.first);
        assert_eq!(RegisterAddress::AGCCTRL0, second.last());
        assert_eq!(RegisterAddress::FREND1, third.first);
        assert_eq!(RegisterAddress::FSCAL0, third.last());
    }

    #[test]
    fn table_lengths_match_register_map() {
        let table = ConfigTable::new(&[0x11; 15], &[0x22; 6], &[0x33; 6]);
        let [first, second, third] = table.patches();

        assert_eq!(
            RegisterAddress::PKTCTRL1.span(RegisterAddress::DEVIATN),
            ConfigTable::PACKET_MODEM_LEN
        );
        assert_eq!(ConfigTable::PACKET_MODEM_LEN, first.values.len());
        assert_eq!(ConfigTable::CONTROL_AGC_LEN, second.values.len());
        assert_eq!(ConfigTable::FRONTEND_CAL_LEN, third.values.len());
        assert_eq!(Some(0x11), table.get(RegisterAddress::DEVIATN));
        assert_eq!(Some(0x22), table.get(RegisterAddress::AGCCTRL0));
        assert_eq!(Some(0x33), table.get(RegisterAddress::FSCAL0));
    }

    #[test]
    fn can_get() {
        assert_eq!(Some(0x06), GFSK_1K2_433.get(RegisterAddress::PKTCTRL1));
        assert_eq!(Some(0x45), GFSK_1K2_433.get(RegisterAddress::PKTCTRL0));
        assert_eq!(Some(0x18), GFSK_1K2_433.get(RegisterAddress::MCSM0));
        assert_eq!(Some(0x1F), GFSK_1K2_433.get(RegisterAddress::FSCAL0));
        assert_eq!(None, GFSK_1K2_433.get(RegisterAddress::MCSM1));
        assert_eq!(None, GFSK_1K2_433.get(RegisterAddress::SYNC1));
    }

    #[test]
    fn defaults() {
        let config = Config::new(0x1234, GFSK_1K2_433);

        assert_eq!(0, config.address);
        assert_eq!(165, config.channel);
        assert_eq!(0xC6, config.tx_power);
        assert_eq!(0x12, config.sync1());
        assert_eq!(0x34, config.sync0());
    }

    #[test]
    fn builder() {
        let config = Config::new(0xD391, GFSK_1K2_433)
            .with_address(0x42)
            .with_channel(3)
            .with_tx_power(0x50);

        assert_eq!(0x42, config.address);
        assert_eq!(3, config.channel);
        assert_eq!(0x50, config.tx_power);
    }
}
