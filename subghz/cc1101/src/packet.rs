//! Packet layout
//!
//! On air and in the FIFO a packet is laid out as
//!
//! ```text
//! [length][address][payload...]                  transmitted, length = 1 + payload length
//! [length][address][payload...][rssi][lqi_crc]   received, rx_len = length + 3
//! ```
//!
//! The length byte counts the address and the payload, but not itself nor the two status
//! bytes appended by the receiver.

use bitfield::bitfield;

use crate::{Rssi, FIFO_LEN, MAX_PAYLOAD};

const LENGTH_OFFSET: usize = 0;
const ADDRESS_OFFSET: usize = 1;
const PAYLOAD_OFFSET: usize = 2;
const TRAILER_LEN: usize = 2;

/// Smallest RXBYTES count that can hold a frame: length, address and the two status bytes.
pub(crate) const MIN_RX_LEN: usize = PAYLOAD_OFFSET + TRAILER_LEN;

/// RSSI offset in dB at 433MHz and 1.2 kBaud, see the CC1101 datasheet.
const RSSI_OFFSET: i16 = 74;

/// Shared buffer layout for transmitted and received packets.
#[derive(Clone, Copy, PartialEq)]
struct Frame([u8; FIFO_LEN]);

impl Frame {
    const fn new() -> Self {
        Self([0; FIFO_LEN])
    }

    const fn length(&self) -> u8 {
        self.0[LENGTH_OFFSET]
    }

    const fn address(&self) -> u8 {
        self.0[ADDRESS_OFFSET]
    }

    fn payload(&self, len: usize) -> &[u8] {
        &self.0[PAYLOAD_OFFSET..PAYLOAD_OFFSET + len]
    }

    fn payload_mut(&mut self, len: usize) -> &mut [u8] {
        &mut self.0[PAYLOAD_OFFSET..PAYLOAD_OFFSET + len]
    }
}

/// A packet to transmit.
#[derive(Clone, Copy, PartialEq)]
pub struct Packet {
    frame: Frame,
}

impl Packet {
    /// Create a packet to `address` (use [`crate::BROADCAST_ADDRESS`] for broadcasting) with room for
    /// `payload_len` payload bytes. The payload is zero filled, see [`Packet::payload_mut`].
    pub fn new(address: u8, payload_len: usize) -> Self {
        assert!(
            payload_len <= MAX_PAYLOAD,
            "payload exceeds the maximum payload length"
        );

        let mut frame = Frame::new();
        frame.0[LENGTH_OFFSET] = payload_len as u8 + 1;
        frame.0[ADDRESS_OFFSET] = address;
        Self { frame }
    }

    /// Create a packet to `address` carrying a copy of `payload`.
    pub fn with_payload(address: u8, payload: &[u8]) -> Self {
        let mut packet = Self::new(address, payload.len());
        packet.payload_mut().copy_from_slice(payload);
        packet
    }

    /// The length byte, i.e. address plus payload.
    pub const fn length(&self) -> u8 {
        self.frame.length()
    }

    pub const fn address(&self) -> u8 {
        self.frame.address()
    }

    pub const fn payload_len(&self) -> usize {
        self.frame.length() as usize - 1
    }

    pub fn payload(&self) -> &[u8] {
        self.frame.payload(self.payload_len())
    }

    pub fn payload_mut(&mut self) -> &mut [u8] {
        let len = self.payload_len();
        self.frame.payload_mut(len)
    }

    /// The bytes written to the TX FIFO: the length byte and the `length` bytes it declares.
    pub fn as_bytes(&self) -> &[u8] {
        &self.frame.0[..1 + self.length() as usize]
    }
}

impl core::fmt::Debug for Packet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Packet")
            .field("address", &self.address())
            .field("payload", &self.payload())
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Packet {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Packet {{ address: {=u8}, payload: {=[u8]} }}",
            self.address(),
            self.payload()
        )
    }
}

/// A packet read from the RX FIFO.
///
/// Nothing is trusted until [`RxPacket::size_valid`] or [`RxPacket::valid`] says so.
#[derive(Clone, Copy, PartialEq)]
pub struct RxPacket {
    frame: Frame,
    rx_len: u8,
}

impl Default for RxPacket {
    fn default() -> Self {
        Self::new()
    }
}

impl RxPacket {
    pub const fn new() -> Self {
        Self {
            frame: Frame::new(),
            rx_len: 0,
        }
    }

    /// The total number of bytes read from the RX FIFO, including the two status bytes.
    pub const fn rx_len(&self) -> u8 {
        self.rx_len
    }

    pub(crate) fn set_rx_len(&mut self, rx_len: u8) {
        self.rx_len = rx_len;
    }

    /// The buffer region that receives `rx_len` bytes from the FIFO.
    pub(crate) fn fifo_mut(&mut self) -> &mut [u8] {
        let len = usize::min(self.rx_len as usize, FIFO_LEN);
        &mut self.frame.0[..len]
    }

    /// The received length byte.
    pub const fn length(&self) -> u8 {
        self.frame.length()
    }

    pub const fn address(&self) -> u8 {
        self.frame.address()
    }

    pub const fn payload_len(&self) -> u8 {
        self.frame.length().saturating_sub(1)
    }

    /// The received payload, or None if the frame size is inconsistent.
    pub fn payload(&self) -> Option<&[u8]> {
        if self.size_valid() {
            Some(self.frame.payload(self.payload_len() as usize))
        } else {
            None
        }
    }

    /// The number of bytes read is within the FIFO bounds and agrees with the length byte.
    pub const fn size_valid(&self) -> bool {
        let rx_len = self.rx_len as usize;
        MIN_RX_LEN <= rx_len
            && rx_len <= FIFO_LEN
            && rx_len == self.frame.length() as usize + 3
    }

    /// The packet has a consistent size and a correct CRC.
    pub fn valid(&self) -> bool {
        self.size_valid() && self.info().is_some_and(|info| info.crc_ok())
    }

    /// The status bytes appended after the payload, or None if `rx_len` cannot hold them.
    pub fn info(&self) -> Option<RxInfo<'_>> {
        let rx_len = self.rx_len as usize;
        if (TRAILER_LEN..=FIFO_LEN).contains(&rx_len) {
            Some(RxInfo {
                trailer: &self.frame.0[rx_len - TRAILER_LEN..rx_len],
            })
        } else {
            None
        }
    }
}

impl core::fmt::Debug for RxPacket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RxPacket")
            .field("rx_len", &self.rx_len)
            .field("length", &self.length())
            .field("address", &self.address())
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RxPacket {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "RxPacket {{ rx_len: {=u8}, length: {=u8}, address: {=u8} }}",
            self.rx_len,
            self.length(),
            self.address()
        )
    }
}

bitfield! {
    #[derive(Clone, Copy)]
    struct LqiCrc(u8);
    crc_ok, _: 7;
    lqi, _: 6, 0;
}

/// View of the RSSI and LQI/CRC bytes appended to a received packet.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxInfo<'a> {
    trailer: &'a [u8],
}

impl<'a> RxInfo<'a> {
    /// The raw RSSI value as reported by the chip.
    pub fn rssi_raw(&self) -> Rssi {
        self.trailer[0] as Rssi
    }

    /// The RSSI converted to dBm.
    pub fn rssi_dbm(&self) -> i16 {
        rssi_dbm(self.rssi_raw())
    }

    pub fn crc_ok(&self) -> bool {
        LqiCrc(self.trailer[1]).crc_ok()
    }

    /// Link quality indicator.
    pub fn lqi(&self) -> u8 {
        LqiCrc(self.trailer[1]).lqi()
    }
}

/// Convert a raw RSSI register value to dBm.
pub(crate) fn rssi_dbm(raw: Rssi) -> i16 {
    raw as i16 / 2 - RSSI_OFFSET
}
