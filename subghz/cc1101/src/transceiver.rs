//! Small packet transceiver
//!
//! # Examples
//!
//! Typical SPI traffic:
//! Method          SPI_TX          Description
//! reset()                         Pulse CSn to wake the chip
//!                 30              Reset chip, wait for SO to go low
//!                 47XX..          Write PKTCTRL1..DEVIATN
//!                 58XX..          Write MCSM0..AGCCTRL0
//!                 61XX..          Write FREND1..FSCAL0
//!                 04XX 05XX       Write sync word
//!                 09XX 0AXX 3EXX  Write address, channel and output power
//!                 84FF 85FF       Read back sync word
//!
//! receive()       34              Start RX
//!
//! get_packet()    FBFF            Read RXBYTES
//!                 FFFF..          Read RXBYTES bytes from RX FIFO
//!
//! send_packet()   7FXX..          Write length, address and payload to TX FIFO
//!                 35              Start TX

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use crate::{
    packet::{self, MIN_RX_LEN},
    regs::RegisterAddress,
    Config, Driver, DriverError, Packet, Rssi, RxPacket, State, StatusByte, Strobe, FIFO_LEN,
};

/// Time chip-select is held high before the wake-up pulse.
const RESET_DESELECT_US: u32 = 5;
/// Time chip-select is held low to wake the chip.
const WAKEUP_HOLD_US: u32 = 10;
/// Time after the wake-up pulse before the reset strobe.
const RESET_SETTLE_US: u32 = 50;

pub struct Transceiver<'a, Spi, Cs, Ready, Delay> {
    pub driver: Driver<Spi, Cs, Ready, Delay>,
    config: Config<'a>,
}

impl<'a, Spi, Cs, Ready, Delay> Transceiver<'a, Spi, Cs, Ready, Delay>
where
    Spi: SpiBus,
    Cs: OutputPin,
    Ready: InputPin,
    Delay: DelayNs,
{
    /// Create a new transceiver. Nothing is sent to the chip until [`Transceiver::begin`].
    pub fn new(driver: Driver<Spi, Cs, Ready, Delay>, config: Config<'a>) -> Self {
        Self { driver, config }
    }

    /// The configuration applied by [`Transceiver::configure`], including setter changes.
    pub fn config(&self) -> &Config<'a> {
        &self.config
    }

    /// Reset and configure the chip.
    pub fn begin(&mut self) -> Result<(), DriverError> {
        info!("Initializing transceiver");
        self.reset()
    }

    /// Reset the chip and configure it.
    pub fn reset(&mut self) -> Result<(), DriverError> {
        self.driver.deselect()?;
        self.driver.delay_us(RESET_DESELECT_US);
        self.wakeup()?;
        self.driver.delay_us(RESET_SETTLE_US);
        self.driver.strobe(Strobe::SRES)?;
        self.configure()
    }

    /// Write the configuration table and the configured scalars, then verify the sync word.
    ///
    /// The table is written before the scalars as ADDR and CHANNR are also part of the table.
    pub fn configure(&mut self) -> Result<(), DriverError> {
        let config = self.config;
        debug!(
            "Configuring sync {:#x}, address {}, channel {}, power {:#x}",
            config.sync, config.address, config.channel, config.tx_power
        );

        for patch in config.table.patches() {
            self.driver.write_patch(patch)?;
        }

        self.driver.write_reg(RegisterAddress::SYNC1, config.sync1())?;
        self.driver.write_reg(RegisterAddress::SYNC0, config.sync0())?;
        self.driver.write_reg(RegisterAddress::ADDR, config.address)?;
        self.driver.write_reg(RegisterAddress::CHANNR, config.channel)?;
        self.driver.write_reg(RegisterAddress::PATABLE, config.tx_power)?;

        let sync1 = self.driver.read_reg(RegisterAddress::SYNC1)?;
        let sync0 = self.driver.read_reg(RegisterAddress::SYNC0)?;
        let actual = u16::from_be_bytes([sync1, sync0]);
        if actual != config.sync {
            warn!(
                "Sync word read back as {:#x}, expected {:#x}",
                actual, config.sync
            );
            return Err(DriverError::SyncMismatch {
                expected: config.sync,
                actual,
            });
        }

        Ok(())
    }

    /// Enter power down. No register access is possible until [`Transceiver::wakeup`].
    pub fn sleep(&mut self) -> Result<(), DriverError> {
        self.driver.strobe(Strobe::SPWD)?;
        Ok(())
    }

    /// Wake the chip from power down.
    pub fn wakeup(&mut self) -> Result<(), DriverError> {
        self.driver.pulse_select(WAKEUP_HOLD_US)
    }

    /// Read the chip status byte.
    pub fn get_status(&mut self) -> Result<StatusByte, DriverError> {
        self.driver.strobe(Strobe::SNOP)
    }

    /// Read the current state.
    pub fn get_state(&mut self) -> Result<State, DriverError> {
        Ok(self.get_status()?.state())
    }

    /// Change the listening address.
    pub fn set_address(&mut self, address: u8) -> Result<(), DriverError> {
        self.driver.write_reg(RegisterAddress::ADDR, address)?;
        self.config.address = address;
        Ok(())
    }

    /// Change the channel.
    pub fn set_channel(&mut self, channel: u8) -> Result<(), DriverError> {
        self.driver.write_reg(RegisterAddress::CHANNR, channel)?;
        self.config.channel = channel;
        Ok(())
    }

    /// Change the output power level.
    pub fn set_tx_power(&mut self, tx_power: u8) -> Result<(), DriverError> {
        self.driver.write_reg(RegisterAddress::PATABLE, tx_power)?;
        self.config.tx_power = tx_power;
        Ok(())
    }

    /// Start the receiver. The chip listens in the background.
    pub fn receive(&mut self) -> Result<(), DriverError> {
        self.driver.strobe(Strobe::SRX)?;
        Ok(())
    }

    /// Read a received packet from the RX FIFO.
    ///
    /// This only reads the bytes, use [`RxPacket::valid`] to see if the packet is intact.
    pub fn get_packet(&mut self, packet: &mut RxPacket) -> Result<(), DriverError> {
        let rx_len = self.driver.read_reg(RegisterAddress::RXBYTES)?;
        packet.set_rx_len(rx_len);

        if (rx_len as usize) < MIN_RX_LEN || FIFO_LEN < rx_len as usize {
            warn!("Invalid RX FIFO length {}", rx_len);
            return Err(DriverError::InvalidRxLength(rx_len));
        }

        self.driver.read_fifo(packet.fifo_mut())?;
        trace!("Received {} bytes", rx_len);
        Ok(())
    }

    /// Write a packet to the TX FIFO and start transmission.
    /// Does not wait for the transmission to complete.
    pub fn send_packet(&mut self, packet: &Packet) -> Result<(), DriverError> {
        self.driver.write_fifo(packet.as_bytes())?;
        self.driver.strobe(Strobe::STX)?;
        Ok(())
    }

    /// Read the raw RSSI value. Only meaningful in RX.
    pub fn get_rssi(&mut self) -> Result<Rssi, DriverError> {
        self.driver.read_rssi()
    }

    /// Read the RSSI in dBm. Only meaningful in RX.
    pub fn get_rssi_dbm(&mut self) -> Result<i16, DriverError> {
        Ok(packet::rssi_dbm(self.get_rssi()?))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        configs::GFSK_1K2_433,
        driver::tests::{MockDriver, Mocks},
    };

    use super::*;

    const CONFIG: Config<'static> = Config::new(0x1234, GFSK_1K2_433);

    type MockTransceiver = Transceiver<
        'static,
        embedded_hal_mocks::spi::MockSpiBus,
        embedded_hal_mocks::digital::MockOutputPin,
        embedded_hal_mocks::digital::MockInputPin,
        embedded_hal_mocks::delay::MockDelay,
    >;

    fn transceiver(mocks: Mocks, config: Config<'static>) -> MockTransceiver {
        let driver: MockDriver = mocks.into_driver();
        Transceiver::new(driver, config)
    }

    fn expect_configure(mocks: &mut Mocks, config: &Config<'static>, readback: [u8; 2]) {
        for patch in config.table.patches() {
            mocks.expect_write_burst(0x40 | patch.first.0, patch.values);
        }
        mocks.expect_write_reg(0x04, config.sync1());
        mocks.expect_write_reg(0x05, config.sync0());
        mocks.expect_write_reg(0x09, config.address);
        mocks.expect_write_reg(0x0A, config.channel);
        mocks.expect_write_reg(0x3E, config.tx_power);
        mocks.expect_read_reg(0x84, readback[0]);
        mocks.expect_read_reg(0x85, readback[1]);
    }

    #[test]
    fn configure_verifies_sync_word() {
        // Given
        let mut mocks = Mocks::new();
        expect_configure(&mut mocks, &CONFIG, [0x12, 0x34]);

        // When
        let mut transceiver = transceiver(mocks, CONFIG);
        let result = transceiver.configure();

        // Then
        assert_eq!(Ok(()), result);
    }

    #[test]
    fn configure_reports_sync_mismatch() {
        // Given
        let mut mocks = Mocks::new();
        expect_configure(&mut mocks, &CONFIG, [0x12, 0x35]);

        // When
        let mut transceiver = transceiver(mocks, CONFIG);
        let result = transceiver.configure();

        // Then
        assert_eq!(
            Err(DriverError::SyncMismatch {
                expected: 0x1234,
                actual: 0x1235
            }),
            result
        );
    }

    #[test]
    fn configure_writes_scalars_after_table() {
        // Given
        let config = Config::new(0xD391, GFSK_1K2_433)
            .with_address(0x42)
            .with_channel(7)
            .with_tx_power(0x50);
        let mut mocks = Mocks::new();
        expect_configure(&mut mocks, &config, [0xD3, 0x91]);

        // When
        let mut transceiver = transceiver(mocks, config);
        transceiver.configure().unwrap();

        // Then
    }

    #[test]
    fn begin_resets_and_configures() {
        // Given
        let mut mocks = Mocks::new();
        mocks.expect_deselect();
        mocks.expect_delay(5);
        mocks.expect_select();
        mocks.expect_delay(10);
        mocks.expect_deselect();
        mocks.expect_delay(50);
        mocks.expect_strobe(Strobe::SRES, 0x0F);
        expect_configure(&mut mocks, &CONFIG, [0x12, 0x34]);

        // When
        let mut transceiver = transceiver(mocks, CONFIG);
        let result = transceiver.begin();

        // Then
        assert_eq!(Ok(()), result);
    }

    #[test]
    fn reset_fails_on_sync_mismatch() {
        // Given
        let mut mocks = Mocks::new();
        mocks.expect_deselect();
        mocks.expect_delay(5);
        mocks.expect_select();
        mocks.expect_delay(10);
        mocks.expect_deselect();
        mocks.expect_delay(50);
        mocks.expect_strobe(Strobe::SRES, 0x0F);
        expect_configure(&mut mocks, &CONFIG, [0xFF, 0xFF]);

        // When
        let mut transceiver = transceiver(mocks, CONFIG);
        let result = transceiver.reset();

        // Then
        assert_eq!(
            Err(DriverError::SyncMismatch {
                expected: 0x1234,
                actual: 0xFFFF
            }),
            result
        );
    }

    #[test]
    fn sleep_and_wakeup() {
        // Given
        let mut mocks = Mocks::new();
        mocks.expect_strobe(Strobe::SPWD, 0x0F);
        mocks.expect_select();
        mocks.expect_delay(10);
        mocks.expect_deselect();

        // When
        let mut transceiver = transceiver(mocks, CONFIG);
        transceiver.sleep().unwrap();
        transceiver.wakeup().unwrap();

        // Then
    }

    #[test]
    fn get_state() {
        // Given
        let mut mocks = Mocks::new();
        mocks.expect_strobe(Strobe::SNOP, 0x1F);
        mocks.expect_strobe(Strobe::SNOP, 0x6F);
        mocks.expect_strobe(Strobe::SNOP, 0x90);

        // When
        let mut transceiver = transceiver(mocks, CONFIG);

        // Then
        assert_eq!(State::RX, transceiver.get_state().unwrap());
        assert_eq!(State::RXFIFO_OVERFLOW, transceiver.get_state().unwrap());
        assert_eq!(State::FAILED, transceiver.get_state().unwrap());
    }

    #[test]
    fn setters_write_through() {
        // Given
        let mut mocks = Mocks::new();
        mocks.expect_write_reg(0x09, 0x42);
        mocks.expect_write_reg(0x0A, 0x03);
        mocks.expect_write_reg(0x3E, 0x50);

        // When
        let mut transceiver = transceiver(mocks, CONFIG);
        transceiver.set_address(0x42).unwrap();
        transceiver.set_channel(0x03).unwrap();
        transceiver.set_tx_power(0x50).unwrap();

        // Then
        assert_eq!(0x42, transceiver.config().address);
        assert_eq!(0x03, transceiver.config().channel);
        assert_eq!(0x50, transceiver.config().tx_power);
        assert_eq!(0x1234, transceiver.config().sync);
    }

    #[test]
    fn reset_reapplies_setter_values() {
        // Given
        let mut mocks = Mocks::new();
        mocks.expect_write_reg(0x0A, 0x03);
        mocks.expect_deselect();
        mocks.expect_delay(5);
        mocks.expect_select();
        mocks.expect_delay(10);
        mocks.expect_deselect();
        mocks.expect_delay(50);
        mocks.expect_strobe(Strobe::SRES, 0x0F);
        expect_configure(&mut mocks, &CONFIG.with_channel(0x03), [0x12, 0x34]);

        // When
        let mut transceiver = transceiver(mocks, CONFIG);
        transceiver.set_channel(0x03).unwrap();
        transceiver.reset().unwrap();

        // Then
    }

    #[test]
    fn receive() {
        // Given
        let mut mocks = Mocks::new();
        mocks.expect_strobe(Strobe::SRX, 0x0F);

        // When
        let mut transceiver = transceiver(mocks, CONFIG);
        transceiver.receive().unwrap();

        // Then
    }

    #[test]
    fn send_packet() {
        // Given
        let mut mocks = Mocks::new();
        mocks.expect_write_burst(0x7F, &[0x03, 0x01, b'H', b'I']);
        mocks.expect_strobe(Strobe::STX, 0x0F);

        // When
        let mut transceiver = transceiver(mocks, CONFIG);
        let packet = Packet::with_payload(0x01, b"HI");
        assert_eq!(3, packet.length());
        transceiver.send_packet(&packet).unwrap();

        // Then
    }

    #[test]
    fn get_packet() {
        // Given
        let mut mocks = Mocks::new();
        mocks.expect_read_reg(0xFB, 6);
        mocks.expect_read_burst(0xFF, &[0x03, 0x01, b'H', b'I', 0xEC, 0x85]);

        // When
        let mut transceiver = transceiver(mocks, CONFIG);
        let mut packet = RxPacket::new();
        let result = transceiver.get_packet(&mut packet);

        // Then
        assert_eq!(Ok(()), result);
        assert_eq!(6, packet.rx_len());
        assert!(packet.size_valid());
        assert!(packet.valid());
        assert_eq!(2, packet.payload_len());
        assert_eq!(Some(&b"HI"[..]), packet.payload());
        assert_eq!(5, packet.info().unwrap().lqi());
    }

    #[test]
    fn get_packet_with_length_mismatch() {
        // Given
        let mut mocks = Mocks::new();
        mocks.expect_read_reg(0xFB, 5);
        mocks.expect_read_burst(0xFF, &[0x03, 0x01, b'H', 0xEC, 0x85]);

        // When
        let mut transceiver = transceiver(mocks, CONFIG);
        let mut packet = RxPacket::new();
        transceiver.get_packet(&mut packet).unwrap();

        // Then
        assert!(!packet.size_valid());
        assert!(!packet.valid());
    }

    #[test]
    fn get_packet_rejects_impossible_lengths() {
        for rx_len in (0..4u8).chain(FIFO_LEN as u8 + 1..=u8::MAX) {
            // Given
            let mut mocks = Mocks::new();
            mocks.expect_read_reg(0xFB, rx_len);

            // When
            let mut transceiver = transceiver(mocks, CONFIG);
            let mut packet = RxPacket::new();
            let result = transceiver.get_packet(&mut packet);

            // Then
            assert_eq!(Err(DriverError::InvalidRxLength(rx_len)), result);
            assert_eq!(rx_len, packet.rx_len());
        }
    }

    #[test]
    fn get_rssi() {
        // Given
        let mut mocks = Mocks::new();
        mocks.expect_read_reg(0xF4, 0xEC);
        mocks.expect_read_reg(0xF4, 0x80);

        // When
        let mut transceiver = transceiver(mocks, CONFIG);

        // Then
        assert_eq!(-20, transceiver.get_rssi().unwrap());
        assert_eq!(-138, transceiver.get_rssi_dbm().unwrap());
    }
}
