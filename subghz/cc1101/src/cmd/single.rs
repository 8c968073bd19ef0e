use crate::{regs::RegisterAddress, StatusByte};

use super::{header, Response, BURST_READ, DUMMY, SINGLE_READ, SINGLE_WRITE};

/// A complete single register access: the header byte followed by the value.
pub struct SingleCommand {
    buf: [u8; 2],
}

impl SingleCommand {
    pub const fn read(address: RegisterAddress) -> Self {
        // Status registers are only reachable with the burst bit set.
        let flags = if address.is_status() {
            BURST_READ
        } else {
            SINGLE_READ
        };
        Self {
            buf: [header(flags, address), DUMMY],
        }
    }

    pub const fn write(address: RegisterAddress, value: u8) -> Self {
        assert!(!address.is_status(), "status registers are read only");
        Self {
            buf: [header(SINGLE_WRITE, address), value],
        }
    }

    /// The register value clocked out by the chip during a read.
    pub fn value(&self) -> u8 {
        self.buf[1]
    }
}

impl Response for SingleCommand {
    fn status_byte(&self) -> StatusByte {
        StatusByte(self.buf[0])
    }
}

impl AsRef<[u8]> for SingleCommand {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl AsMut<[u8]> for SingleCommand {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_config() {
        let cmd = SingleCommand::read(RegisterAddress::SYNC1);
        assert_eq!(&[SINGLE_READ | 0x04, DUMMY], cmd.as_ref());
    }

    #[test]
    fn read_status() {
        let cmd = SingleCommand::read(RegisterAddress::RXBYTES);
        assert_eq!(&[0xFB, DUMMY], cmd.as_ref());

        let cmd = SingleCommand::read(RegisterAddress::RSSI);
        assert_eq!(&[0xF4, DUMMY], cmd.as_ref());
    }

    #[test]
    fn write() {
        let cmd = SingleCommand::write(RegisterAddress::CHANNR, 0xA5);
        assert_eq!(&[SINGLE_WRITE | 0x0A, 0xA5], cmd.as_ref());

        let cmd = SingleCommand::write(RegisterAddress::PATABLE, 0xC6);
        assert_eq!(&[0x3E, 0xC6], cmd.as_ref());
    }

    #[test]
    #[should_panic]
    fn write_status() {
        SingleCommand::write(RegisterAddress::MARCSTATE, 0x00);
    }

    #[test]
    fn response() {
        let mut cmd = SingleCommand::read(RegisterAddress::SYNC0);
        cmd.as_mut().copy_from_slice(&[0x1F, 0x34]);
        assert_eq!(0x34, cmd.value());
        assert_eq!(0x1F, cmd.status_byte().0);
    }
}
