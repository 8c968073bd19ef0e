#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// The SPI bus failed.
    Spi,
    /// The chip-select or ready pin failed.
    Pin,
    /// The chip did not pull the ready line low in time.
    Timeout,
    /// The sync word read back after configuration differs from what was written.
    SyncMismatch { expected: u16, actual: u16 },
    /// RXBYTES reported a count that cannot be a complete frame.
    InvalidRxLength(u8),
}

impl<SpiError> From<SpiError> for DriverError
where
    SpiError: embedded_hal::spi::Error,
{
    fn from(_value: SpiError) -> Self {
        Self::Spi
    }
}
