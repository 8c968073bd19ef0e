use core::{borrow::Borrow, slice};

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use crate::{
    cmd::{BurstHeader, Response, SingleCommand, StrobeCommand, DUMMY},
    regs::{MarcState, RegisterAddress, RxBytes, TxBytes},
    ConfigPatch, DriverError, PartNumber, Rssi, StatusByte, Strobe, FIFO_LEN,
};

/// How long to wait for the chip to pull the ready line low before giving up.
pub const DEFAULT_READY_TIMEOUT_US: u32 = 2_000;

/// Low level access to the CC1101.
///
/// Every access asserts chip-select, waits for the chip to signal ready on the SO line,
/// exchanges the header and any data bytes, and releases chip-select again.
pub struct Driver<Spi, Cs, Ready, Delay> {
    spi: Spi,
    cs: Cs,
    ready: Ready,
    delay: Delay,
    last_status: Option<StatusByte>,
    pub ready_timeout_us: u32,
}

impl<Spi, Cs, Ready, Delay> Driver<Spi, Cs, Ready, Delay>
where
    Spi: SpiBus,
    Cs: OutputPin,
    Ready: InputPin,
    Delay: DelayNs,
{
    /// Create a new driver.
    ///
    /// `ready` must sample the level of the chip SO line, which the chip holds high until its
    /// crystal is running after chip-select is asserted.
    pub fn new(spi: Spi, cs: Cs, ready: Ready, delay: Delay) -> Self {
        Self {
            spi,
            cs,
            ready,
            delay,
            last_status: None,
            ready_timeout_us: DEFAULT_READY_TIMEOUT_US,
        }
    }

    /// Get the status returned while the header byte of the last access was sent.
    pub fn last_status(&self) -> Option<StatusByte> {
        self.last_status
    }

    /// Strobe a command to the chip and return the status byte.
    /// This action _does_ update `last_status`.
    pub fn strobe(&mut self, strobe: Strobe) -> Result<StatusByte, DriverError> {
        let mut cmd = StrobeCommand::new(strobe);

        self.transaction(|this| {
            this.spi.transfer_in_place(cmd.as_mut())?;
            if strobe == Strobe::SRES {
                // When SRES strobe is issued the CSn pin must be kept low until the SO pin goes low again.
                this.wait_ready()?;
            }
            Ok(())
        })?;

        let status = cmd.status_byte();
        trace!("Strobe {:?} -> {:#x}", strobe, status.0);
        self.last_status = Some(status);
        Ok(status)
    }

    /// Read a single register value from chip.
    /// This action _does_ update `last_status`.
    pub fn read_reg(&mut self, reg: RegisterAddress) -> Result<u8, DriverError> {
        let mut cmd = SingleCommand::read(reg);

        self.transaction(|this| {
            this.spi.transfer_in_place(cmd.as_mut())?;
            Ok(())
        })?;

        self.last_status = Some(cmd.status_byte());
        trace!("Read {:#x} = {:#x}", reg.0, cmd.value());
        Ok(cmd.value())
    }

    /// Read a sequence of register values from chip.
    /// This action _does_ update `last_status`.
    pub fn read_regs(
        &mut self,
        first: RegisterAddress,
        buffer: &mut [u8],
    ) -> Result<(), DriverError> {
        self.read_burst(BurstHeader::read(first), buffer)?;
        trace!("Read {} bytes from {:#x}", buffer.len(), first.0);
        Ok(())
    }

    /// Write a single register value to chip.
    /// This action _does_ update `last_status`.
    pub fn write_reg(&mut self, reg: RegisterAddress, value: u8) -> Result<(), DriverError> {
        let mut cmd = SingleCommand::write(reg, value);

        self.transaction(|this| {
            this.spi.transfer_in_place(cmd.as_mut())?;
            Ok(())
        })?;

        self.last_status = Some(cmd.status_byte());
        trace!("Write {:#x} = {:#x}", reg.0, value);
        Ok(())
    }

    /// Write a sequence of register values to chip, starting at `first`.
    /// The values may come from any byte source, e.g. a slice or a static configuration table.
    /// This action _does_ update `last_status`.
    pub fn write_regs<I>(&mut self, first: RegisterAddress, values: I) -> Result<(), DriverError>
    where
        I: IntoIterator,
        I::Item: Borrow<u8>,
    {
        let written = self.write_burst(BurstHeader::write(first), values)?;
        trace!("Wrote {} bytes from {:#x}", written, first.0);
        Ok(())
    }

    /// Write a configuration patch to chip.
    /// This action _does_ update `last_status`.
    pub fn write_patch(&mut self, patch: ConfigPatch<'_>) -> Result<(), DriverError> {
        self.write_regs(patch.first, patch.values)
    }

    /// Read from the RX fifo.
    /// This action _does_ update `last_status`.
    pub fn read_fifo(&mut self, buffer: &mut [u8]) -> Result<(), DriverError> {
        assert!(buffer.len() <= FIFO_LEN);
        self.read_burst(BurstHeader::read_fifo(), buffer)?;
        trace!("Read {} bytes from fifo", buffer.len());
        Ok(())
    }

    /// Write to the TX fifo.
    /// This action _does_ update `last_status`.
    pub fn write_fifo(&mut self, buffer: &[u8]) -> Result<(), DriverError> {
        assert!(buffer.len() <= FIFO_LEN);
        self.write_burst(BurstHeader::write_fifo(), buffer)?;
        trace!("Wrote {} bytes to fifo", buffer.len());
        Ok(())
    }

    /// Read the current raw RSSI value. Only meaningful in RX.
    /// This action _does_ update `last_status`.
    pub fn read_rssi(&mut self) -> Result<Rssi, DriverError> {
        Ok(self.read_reg(RegisterAddress::RSSI)? as Rssi)
    }

    /// Read the chip part number and version.
    /// This action _does_ update `last_status`.
    pub fn read_part_number(&mut self) -> Result<PartNumber, DriverError> {
        let partnum = self.read_reg(RegisterAddress::PARTNUM)?;
        let version = self.read_reg(RegisterAddress::VERSION)?;
        Ok(PartNumber { partnum, version })
    }

    /// Read the main radio control state, or None if the chip reports an undefined state.
    /// This action _does_ update `last_status`.
    pub fn read_marc_state(&mut self) -> Result<Option<MarcState>, DriverError> {
        let value = self.read_reg(RegisterAddress::MARCSTATE)?;
        Ok(MarcState::from_register(value))
    }

    /// Read the RX FIFO byte count and overflow flag.
    /// This action _does_ update `last_status`.
    pub fn read_rx_bytes(&mut self) -> Result<RxBytes, DriverError> {
        Ok(RxBytes(self.read_reg(RegisterAddress::RXBYTES)?))
    }

    /// Read the TX FIFO byte count and underflow flag.
    /// This action _does_ update `last_status`.
    pub fn read_tx_bytes(&mut self) -> Result<TxBytes, DriverError> {
        Ok(TxBytes(self.read_reg(RegisterAddress::TXBYTES)?))
    }

    /// Assert chip-select for `hold_us` without clocking any bytes.
    /// This brings the chip out of power down.
    pub fn pulse_select(&mut self, hold_us: u32) -> Result<(), DriverError> {
        self.select()?;
        self.delay.delay_us(hold_us);
        self.deselect()
    }

    pub fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    pub fn deselect(&mut self) -> Result<(), DriverError> {
        self.cs.set_high().map_err(|_| DriverError::Pin)
    }

    fn read_burst(
        &mut self,
        mut header: BurstHeader,
        buffer: &mut [u8],
    ) -> Result<(), DriverError> {
        self.transaction(|this| {
            this.spi.transfer_in_place(header.as_mut())?;
            if !buffer.is_empty() {
                buffer.fill(DUMMY);
                this.spi.transfer_in_place(buffer)?;
            }
            Ok(())
        })?;

        self.last_status = Some(header.status_byte());
        Ok(())
    }

    /// Returns the number of bytes written after the header.
    fn write_burst<I>(&mut self, mut header: BurstHeader, values: I) -> Result<usize, DriverError>
    where
        I: IntoIterator,
        I::Item: Borrow<u8>,
    {
        let written = self.transaction(|this| {
            this.spi.transfer_in_place(header.as_mut())?;
            let mut written = 0usize;
            for value in values {
                this.spi.write(slice::from_ref(value.borrow()))?;
                written += 1;
            }
            Ok(written)
        })?;

        self.last_status = Some(header.status_byte());
        Ok(written)
    }

    fn select(&mut self) -> Result<(), DriverError> {
        self.cs.set_low().map_err(|_| DriverError::Pin)
    }

    /// Run `f` with chip-select asserted and the chip ready.
    /// Chip-select is released also if `f` fails.
    fn transaction<R, F>(&mut self, f: F) -> Result<R, DriverError>
    where
        F: FnOnce(&mut Self) -> Result<R, DriverError>,
    {
        self.select()?;
        let result = self.selected(f);
        let deselected = self.deselect();
        let value = result?;
        deselected?;
        Ok(value)
    }

    fn selected<R, F>(&mut self, f: F) -> Result<R, DriverError>
    where
        F: FnOnce(&mut Self) -> Result<R, DriverError>,
    {
        self.wait_ready()?;
        let value = f(self)?;
        self.spi.flush()?;
        Ok(value)
    }

    /// Wait for the chip to pull SO low.
    fn wait_ready(&mut self) -> Result<(), DriverError> {
        let mut waited_us = 0;
        while !self.ready.is_low().map_err(|_| DriverError::Pin)? {
            if waited_us >= self.ready_timeout_us {
                warn!("Chip not ready after {} us", waited_us);
                return Err(DriverError::Timeout);
            }
            self.delay.delay_us(1);
            waited_us += 1;
        }
        Ok(())
    }
}
