use embedded_hal::delay::DelayNs;
use ufmt::uWrite;

use crate::buffers::{RxBufferId, TxBuffer, TxBufferId};
use crate::bus::CommandBus;
use crate::commands::INSTRUCTION_RESET;
use crate::config::Config;
use crate::errors::Mcp2515Error;
use crate::modes::OperatingMode;
use crate::registers::*;

/// Time between two reads of CANSTAT while waiting for a mode.
const POLL_INTERVAL_MS: u32 = 1;

macro_rules! debug_log {
    ($self:ident, $serial:ident, $($arg:tt)*) => {
        if $self.config.debug {
            ufmt::uwriteln!($serial, $($arg)*).ok();
        }
    };
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ErrorCounters {
    pub tec: u8,
    pub rec: u8,
    pub flags: u8,
}

/// MCP2515 CAN controller.
///
/// The chip holds all state; the driver only remembers which registers
/// belong to which transmit buffer and whether a buffer has been set up
/// since the last reset. Every operation takes `&mut self`, so sharing
/// one chip between callers needs a lock around the whole driver.
pub struct Mcp2515<B, D> {
    bus: B,
    delay: D,
    config: Config,
    tx_buffers: [TxBuffer; TX_BUFFER_COUNT],
}

impl<B, D> Mcp2515<B, D>
where
    B: CommandBus,
    D: DelayNs,
{
    pub fn new(bus: B, delay: D, config: Config) -> Self {
        Mcp2515 {
            bus,
            delay,
            config,
            tx_buffers: TxBufferId::ALL.map(TxBuffer::new),
        }
    }

    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tx_buffer(&self, id: TxBufferId) -> &TxBuffer {
        &self.tx_buffers[id.index()]
    }

    /// Brings the chip from an unknown state into the configured operating
    /// mode with all three transmit buffers ready. Stops at the first
    /// failing step.
    pub fn init<W: uWrite>(&mut self, serial: &mut W) -> Result<(), Mcp2515Error> {
        self.reset(serial)?;
        self.configure_bit_timing(serial)?;
        self.configure_interrupts(serial)?;
        self.configure_masks_filters(serial)?;
        self.switch_mode(serial, self.config.operating_mode)?;
        for id in TxBufferId::ALL {
            self.init_tx_buffer(serial, id)?;
        }
        Ok(())
    }

    /// Resets the chip and waits for configuration mode.
    ///
    /// Returns the attempt that succeeded. When every attempt runs out of
    /// time the chip is considered dead and `ResetFailed` is returned.
    pub fn reset<W: uWrite>(&mut self, serial: &mut W) -> Result<u8, Mcp2515Error> {
        for attempt in 1..=self.config.reset_attempts {
            debug_log!(self, serial, "Reset chip, attempt {}", attempt);
            self.bus.send_instruction(INSTRUCTION_RESET)?;
            // Reset clears every buffer register on the chip
            for buffer in self.tx_buffers.iter_mut() {
                buffer.initialized = false;
            }

            match self.wait_for_mode(OperatingMode::Configuration, self.config.max_wait_ms) {
                Ok(status) => {
                    debug_log!(self, serial, "Configuration mode reached, status {}", status);
                    return Ok(attempt);
                }
                Err(Mcp2515Error::Timeout) => {
                    debug_log!(self, serial, "No configuration mode after {} ms, trying again", self.config.max_wait_ms);
                }
                Err(err) => return Err(err),
            }
        }

        debug_log!(self, serial, "Reset failed after {} attempts", self.config.reset_attempts);
        Err(Mcp2515Error::ResetFailed)
    }

    /// Requests `mode` and waits until CANSTAT reports it.
    pub fn switch_mode<W: uWrite>(
        &mut self,
        serial: &mut W,
        mode: OperatingMode,
    ) -> Result<(), Mcp2515Error> {
        self.bus.write_register(CANCTRL_REG, mode.bits())?;
        match self.wait_for_mode(mode, self.config.mode_switch_wait_ms) {
            Ok(status) => {
                debug_log!(self, serial, "Switched to mode {:?}, status {}", mode, status);
                Ok(())
            }
            Err(err) => {
                debug_log!(self, serial, "Mode switch to {:?} failed: {:?}", mode, err);
                Err(err)
            }
        }
    }

    pub fn configure_bit_timing<W: uWrite>(&mut self, serial: &mut W) -> Result<(), Mcp2515Error> {
        debug_log!(self, serial, "Configure bit timing");
        self.bus.write_register(CNF1_REG, CNF1_VALUE)?;
        self.bus.write_register(CNF2_REG, CNF2_VALUE)?;
        self.bus.write_register(CNF3_REG, CNF3_VALUE)?;
        Ok(())
    }

    pub fn configure_interrupts<W: uWrite>(&mut self, serial: &mut W) -> Result<(), Mcp2515Error> {
        debug_log!(self, serial, "Configure interrupts");
        self.bus.write_register(CANINTE_REG, CANINTE_VALUE)
    }

    /// Turns masks and filters off on both receive buffers.
    pub fn configure_masks_filters<W: uWrite>(&mut self, serial: &mut W) -> Result<(), Mcp2515Error> {
        debug_log!(self, serial, "Configure masks and filters");
        self.bus.write_register(RXB0CTRL_REG, RXB0CTRL_VALUE)?;
        self.bus.write_register(RXB1CTRL_REG, RXB1CTRL_VALUE)?;
        Ok(())
    }

    /// Programs the identifier and data length of one transmit buffer.
    pub fn init_tx_buffer<W: uWrite>(
        &mut self,
        serial: &mut W,
        id: TxBufferId,
    ) -> Result<(), Mcp2515Error> {
        if usize::from(self.config.message_size) > DATA_LEN {
            return Err(Mcp2515Error::MessageTooLong);
        }
        let buffer = self.tx_buffers[id.index()];
        debug_log!(self, serial, "Init transmit buffer {:?}", buffer.id);
        self.bus.write_register(buffer.registers.sidl, TXB_SIDL_VALUE)?;
        self.bus.write_register(buffer.registers.sidh, TXB_SIDH_VALUE)?;
        // RTR stays cleared, these are data frames
        self.bus.write_register(buffer.registers.dlc, self.config.message_size)?;
        self.tx_buffers[id.index()].initialized = true;
        Ok(())
    }

    /// True while the chip still holds a transmission request for the buffer.
    pub fn is_tx_pending(&mut self, id: TxBufferId) -> Result<bool, Mcp2515Error> {
        let ctrl = self.tx_buffers[id.index()].registers.ctrl;
        Ok(self.bus.read_register(ctrl)? & TXBCTRL_TXREQ != 0)
    }

    pub fn load_tx_byte(
        &mut self,
        id: TxBufferId,
        offset: usize,
        value: u8,
    ) -> Result<(), Mcp2515Error> {
        let address = self.initialized_buffer(id)?.data_register(offset)?;
        self.bus.write_register(address, value)
    }

    /// Loads `data` into the first bytes of a transmit buffer in one burst.
    pub fn load_tx_message(&mut self, id: TxBufferId, data: &[u8]) -> Result<(), Mcp2515Error> {
        if data.len() > DATA_LEN {
            return Err(Mcp2515Error::MessageTooLong);
        }
        let first = self.initialized_buffer(id)?.data_register(0)?;
        if data.is_empty() {
            return Ok(());
        }

        let mut frame = [0u8; DATA_LEN + 1];
        frame[0] = first;
        frame[1..=data.len()].copy_from_slice(data);
        self.bus.write_register_burst(&frame[..=data.len()])
    }

    /// Asks the chip to transmit the current contents of a buffer.
    pub fn request_to_send(&mut self, id: TxBufferId) -> Result<(), Mcp2515Error> {
        let rts = self.initialized_buffer(id)?.rts;
        self.bus.send_instruction(rts)
    }

    pub fn transmit(&mut self, id: TxBufferId, data: &[u8]) -> Result<(), Mcp2515Error> {
        self.load_tx_message(id, data)?;
        self.request_to_send(id)
    }

    pub fn read_status(&mut self) -> Result<u8, Mcp2515Error> {
        self.bus.read_status()
    }

    pub fn current_mode(&mut self) -> Result<Option<OperatingMode>, Mcp2515Error> {
        let status = self.bus.read_register(CANSTAT_REG)?;
        Ok(OperatingMode::from_status(status))
    }

    pub fn read_error_counters(&mut self) -> Result<ErrorCounters, Mcp2515Error> {
        Ok(ErrorCounters {
            tec: self.bus.read_register(TEC_REG)?,
            rec: self.bus.read_register(REC_REG)?,
            flags: self.bus.read_register(EFLG_REG)?,
        })
    }

    /// Reads the first `out.len()` data bytes of a receive buffer.
    pub fn read_rx_data(&mut self, id: RxBufferId, out: &mut [u8]) -> Result<(), Mcp2515Error> {
        if out.len() > DATA_LEN {
            return Err(Mcp2515Error::MessageTooLong);
        }
        self.bus.read_burst(RXB_DATA[id.index()][0], out)
    }

    pub fn read_register(&mut self, address: u8) -> Result<u8, Mcp2515Error> {
        self.bus.read_register(address)
    }

    fn initialized_buffer(&self, id: TxBufferId) -> Result<&TxBuffer, Mcp2515Error> {
        let buffer = &self.tx_buffers[id.index()];
        if !buffer.initialized {
            return Err(Mcp2515Error::BufferNotInitialized);
        }
        Ok(buffer)
    }

    fn wait_for_mode(&mut self, mode: OperatingMode, budget_ms: u32) -> Result<u8, Mcp2515Error> {
        let mut elapsed_ms = 0;
        loop {
            let status = self.bus.read_register(CANSTAT_REG)?;
            if mode.is_reflected_by(status) {
                return Ok(status);
            }
            if elapsed_ms >= budget_ms {
                return Err(Mcp2515Error::Timeout);
            }
            self.delay.delay_ms(POLL_INTERVAL_MS);
            elapsed_ms += POLL_INTERVAL_MS;
        }
    }
}
