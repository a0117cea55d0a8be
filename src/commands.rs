// src/commands.rs

use crate::buffers::TxBufferId;

// Command bus instructions for the MCP2515
pub const INSTRUCTION_RESET: u8 = 0xC0;
pub const INSTRUCTION_READ: u8 = 0x03;
pub const INSTRUCTION_WRITE: u8 = 0x02;
pub const INSTRUCTION_READ_STATUS: u8 = 0xA0;
pub const INSTRUCTION_RX_STATUS: u8 = 0xB0;
pub const INSTRUCTION_BIT_MODIFY: u8 = 0x05;

// Request to send, one per transmit buffer
pub const INSTRUCTION_RTS_TXB0: u8 = 0x81;
pub const INSTRUCTION_RTS_TXB1: u8 = 0x82;
pub const INSTRUCTION_RTS_TXB2: u8 = 0x84;

// Buffer shortcuts: load starting at TXB0SIDH / TXB0D0, read starting at RXBnSIDH / RXBnD0
pub const INSTRUCTION_LOAD_TXB0_ID: u8 = 0x40;
pub const INSTRUCTION_LOAD_TXB0_DATA: u8 = 0x41;
pub const INSTRUCTION_READ_RXB0_ID: u8 = 0x90;
pub const INSTRUCTION_READ_RXB0_DATA: u8 = 0x92;
pub const INSTRUCTION_READ_RXB1_ID: u8 = 0x94;
pub const INSTRUCTION_READ_RXB1_DATA: u8 = 0x96;

pub fn rts_instruction(buffer: TxBufferId) -> u8 {
    match buffer {
        TxBufferId::Txb0 => INSTRUCTION_RTS_TXB0,
        TxBufferId::Txb1 => INSTRUCTION_RTS_TXB1,
        TxBufferId::Txb2 => INSTRUCTION_RTS_TXB2,
    }
}
