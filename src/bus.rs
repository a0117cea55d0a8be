// src/bus.rs

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::commands::{INSTRUCTION_READ, INSTRUCTION_READ_STATUS, INSTRUCTION_WRITE};
use crate::errors::Mcp2515Error;

/// Primitive register operations on one chip.
///
/// Every call is one complete transaction with the chip selected. The
/// implementation decides which chip on a shared bus it talks to.
pub trait CommandBus {
    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Mcp2515Error>;

    /// Writes `bytes[1..]` to consecutive registers starting at `bytes[0]`.
    /// Fewer than two bytes is an `InvalidArgument`.
    fn write_register_burst(&mut self, bytes: &[u8]) -> Result<(), Mcp2515Error>;

    fn read_register(&mut self, address: u8) -> Result<u8, Mcp2515Error>;

    /// Fills `buffer` from consecutive registers starting at `address`.
    fn read_burst(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Mcp2515Error>;

    /// Single-byte instruction: reset or request to send.
    fn send_instruction(&mut self, opcode: u8) -> Result<(), Mcp2515Error>;

    /// Quick status byte, distinct from a normal register read.
    fn read_status(&mut self) -> Result<u8, Mcp2515Error>;
}

/// `CommandBus` over an SPI bus with a dedicated chip select pin.
///
/// Several chips can share one bus by handing each instance `&mut SPI`
/// and its own chip select.
pub struct SpiCommandBus<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> SpiCommandBus<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    pub fn new(spi: SPI, cs: CS) -> Self {
        SpiCommandBus { spi, cs }
    }

    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    fn transaction<T, F>(&mut self, f: F) -> Result<T, Mcp2515Error>
    where
        F: FnOnce(&mut SPI) -> Result<T, SPI::Error>,
    {
        self.cs.set_low().map_err(|_| Mcp2515Error::CommunicationError)?;
        let result = f(&mut self.spi);
        let flushed = self.spi.flush();
        // Deselect even when the transfer failed
        self.cs.set_high().map_err(|_| Mcp2515Error::CommunicationError)?;
        flushed.map_err(|_| Mcp2515Error::CommunicationError)?;
        result.map_err(|_| Mcp2515Error::CommunicationError)
    }
}

impl<SPI, CS> CommandBus for SpiCommandBus<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Mcp2515Error> {
        self.transaction(|spi| spi.write(&[INSTRUCTION_WRITE, address, value]))
    }

    fn write_register_burst(&mut self, bytes: &[u8]) -> Result<(), Mcp2515Error> {
        if bytes.len() < 2 {
            return Err(Mcp2515Error::InvalidArgument);
        }
        self.transaction(|spi| {
            spi.write(&[INSTRUCTION_WRITE])?;
            spi.write(bytes)
        })
    }

    fn read_register(&mut self, address: u8) -> Result<u8, Mcp2515Error> {
        let mut buffer = [INSTRUCTION_READ, address, 0x00];
        self.transaction(|spi| spi.transfer_in_place(&mut buffer))?;
        Ok(buffer[2])
    }

    fn read_burst(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Mcp2515Error> {
        self.transaction(|spi| {
            spi.write(&[INSTRUCTION_READ, address])?;
            spi.read(buffer)
        })
    }

    fn send_instruction(&mut self, opcode: u8) -> Result<(), Mcp2515Error> {
        self.transaction(|spi| spi.write(&[opcode]))
    }

    fn read_status(&mut self) -> Result<u8, Mcp2515Error> {
        let mut buffer = [INSTRUCTION_READ_STATUS, 0x00];
        self.transaction(|spi| spi.transfer_in_place(&mut buffer))?;
        Ok(buffer[1])
    }
}
