use core::fmt::{Debug, Formatter, Result};
use ufmt::{uDebug, uWrite};

use crate::commands::rts_instruction;
use crate::errors::Mcp2515Error;
use crate::registers::{TxBufferRegisters, TX_BUFFERS};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TxBufferId {
    Txb0,
    Txb1,
    Txb2,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RxBufferId {
    Rxb0,
    Rxb1,
}

impl TxBufferId {
    pub const ALL: [TxBufferId; 3] = [TxBufferId::Txb0, TxBufferId::Txb1, TxBufferId::Txb2];

    pub const fn index(self) -> usize {
        match self {
            TxBufferId::Txb0 => 0,
            TxBufferId::Txb1 => 1,
            TxBufferId::Txb2 => 2,
        }
    }
}

impl RxBufferId {
    pub const fn index(self) -> usize {
        match self {
            RxBufferId::Rxb0 => 0,
            RxBufferId::Rxb1 => 1,
        }
    }
}

impl TryFrom<u8> for TxBufferId {
    type Error = Mcp2515Error;

    fn try_from(id: u8) -> core::result::Result<Self, Self::Error> {
        match id {
            0 => Ok(TxBufferId::Txb0),
            1 => Ok(TxBufferId::Txb1),
            2 => Ok(TxBufferId::Txb2),
            _ => Err(Mcp2515Error::InvalidBuffer),
        }
    }
}

impl TryFrom<u8> for RxBufferId {
    type Error = Mcp2515Error;

    fn try_from(id: u8) -> core::result::Result<Self, Self::Error> {
        match id {
            0 => Ok(RxBufferId::Rxb0),
            1 => Ok(RxBufferId::Rxb1),
            _ => Err(Mcp2515Error::InvalidBuffer),
        }
    }
}

impl Debug for TxBufferId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "TXB{}", self.index())
    }
}

impl uDebug for TxBufferId {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<W>) -> core::result::Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            TxBufferId::Txb0 => f.write_str("TXB0"),
            TxBufferId::Txb1 => f.write_str("TXB1"),
            TxBufferId::Txb2 => f.write_str("TXB2"),
        }
    }
}

/// Which addresses to target for one transmit buffer.
///
/// This mirrors the register map, not the chip contents. `initialized`
/// records whether identifier and length have been programmed since the
/// last reset.
#[derive(Clone, Copy, Debug)]
pub struct TxBuffer {
    pub id: TxBufferId,
    pub registers: TxBufferRegisters,
    pub rts: u8,
    pub initialized: bool,
}

impl TxBuffer {
    pub fn new(id: TxBufferId) -> Self {
        TxBuffer {
            id,
            registers: TX_BUFFERS[id.index()],
            rts: rts_instruction(id),
            initialized: false,
        }
    }

    pub fn data_register(&self, offset: usize) -> core::result::Result<u8, Mcp2515Error> {
        self.registers
            .data
            .get(offset)
            .copied()
            .ok_or(Mcp2515Error::InvalidByteOffset)
    }
}
