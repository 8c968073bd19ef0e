use crate::ConfigTable;

/// This CC1101 configuration is obtained using TI SmartRF Studio 7 with a 26MHz crystal.
///
/// The following sequence of adjustments are performed after the CC1101 chip is selected from the main screen:
/// 1. Select "Expert Mode".
/// 2. In the Device Control Panel, under Typical Settings, select "GFSK 1.2 kBaud, 5.2kHz deviation, 58kHz RX filter BW".
/// 3. Under RF parameters, set:
///     Base Frequency: 399.999939MHz (400MHz)
///     Channel Spacing: 199.951172kHz (200kHz)
/// 4. In the Register View, make the following final adjustments:
///     PKTCTRL1       0x04 -> 0x06  Address check, 0 is broadcast
///     PKTCTRL0       0x05 -> 0x45  Data whitening
/// 5. Export registers using the "RF settings" template and keep the three blocks written by the driver.
pub const GFSK_1K2_433: ConfigTable<'static> = ConfigTable::new(
    &[
        0x06, // PKTCTRL1              Packet Automation Control
        0x45, // PKTCTRL0              Packet Automation Control
        0x00, // ADDR                  Device Address
        0x00, // CHANNR                Channel Number
        0x06, // FSCTRL1               Frequency Synthesizer Control
        0x00, // FSCTRL0               Frequency Synthesizer Control
        0x0F, // FREQ2                 Frequency Control Word, High Byte
        0x62, // FREQ1                 Frequency Control Word, Middle Byte
        0x76, // FREQ0                 Frequency Control Word, Low Byte
        0xF5, // MDMCFG4               Modem Configuration
        0x83, // MDMCFG3               Modem Configuration
        0x13, // MDMCFG2               Modem Configuration
        0x22, // MDMCFG1               Modem Configuration
        0xF8, // MDMCFG0               Modem Configuration
        0x15, // DEVIATN               Modem Deviation Setting
    ],
    &[
        0x18, // MCSM0                 Main Radio Control State Machine Configuration
        0x16, // FOCCFG                Frequency Offset Compensation Configuration
        0x6C, // BSCFG                 Bit Synchronization Configuration
        0x03, // AGCCTRL2              AGC Control
        0x40, // AGCCTRL1              AGC Control
        0x91, // AGCCTRL0              AGC Control
    ],
    &[
        0x56, // FREND1                Front End RX Configuration
        0x10, // FREND0                Front End TX Configuration
        0xE9, // FSCAL3                Frequency Synthesizer Calibration
        0x2A, // FSCAL2                Frequency Synthesizer Calibration
        0x00, // FSCAL1                Frequency Synthesizer Calibration
        0x1F, // FSCAL0                Frequency Synthesizer Calibration
    ],
);
