// src/registers.rs

use crate::buffers::{RxBufferId, TxBufferId};

// Control Registers
pub const BFPCTRL_REG: u8 = 0x0C;              // RXnBF pin control and status
pub const TXRTSCTRL_REG: u8 = 0x0D;            // TXnRTS pin control and status
pub const CANSTAT_REG: u8 = 0x0E;              // Operating mode and interrupt code (read only)
pub const CANCTRL_REG: u8 = 0x0F;              // Requested operating mode
pub const TEC_REG: u8 = 0x1C;                  // Transmit error counter
pub const REC_REG: u8 = 0x1D;                  // Receive error counter

// Bit Timing and Interrupt Configuration
pub const CNF3_REG: u8 = 0x28;
pub const CNF2_REG: u8 = 0x29;
pub const CNF1_REG: u8 = 0x2A;
pub const CANINTE_REG: u8 = 0x2B;              // Interrupt enable
pub const CANINTF_REG: u8 = 0x2C;              // Interrupt flags
pub const EFLG_REG: u8 = 0x2D;                 // Error flags

// Transmit Buffer 0
pub const TXB0CTRL_REG: u8 = 0x30;
pub const TXB0SIDH_REG: u8 = 0x31;
pub const TXB0SIDL_REG: u8 = 0x32;
pub const TXB0DLC_REG: u8 = 0x35;
pub const TXB0D0_REG: u8 = 0x36;

// Transmit Buffer 1
pub const TXB1CTRL_REG: u8 = 0x40;
pub const TXB1SIDH_REG: u8 = 0x41;
pub const TXB1SIDL_REG: u8 = 0x42;
pub const TXB1DLC_REG: u8 = 0x45;
pub const TXB1D0_REG: u8 = 0x46;

// Transmit Buffer 2
pub const TXB2CTRL_REG: u8 = 0x50;
pub const TXB2SIDH_REG: u8 = 0x51;
pub const TXB2SIDL_REG: u8 = 0x52;
pub const TXB2DLC_REG: u8 = 0x55;
pub const TXB2D0_REG: u8 = 0x56;

// Receive Buffer 0
pub const RXB0CTRL_REG: u8 = 0x60;
pub const RXB0SIDH_REG: u8 = 0x61;
pub const RXB0SIDL_REG: u8 = 0x62;
pub const RXB0DLC_REG: u8 = 0x65;
pub const RXB0D0_REG: u8 = 0x66;

// Receive Buffer 1
pub const RXB1CTRL_REG: u8 = 0x70;
pub const RXB1SIDH_REG: u8 = 0x71;
pub const RXB1SIDL_REG: u8 = 0x72;
pub const RXB1DLC_REG: u8 = 0x75;
pub const RXB1D0_REG: u8 = 0x76;

/// Number of data bytes held by every transmit and receive buffer.
pub const DATA_LEN: usize = 8;
pub const TX_BUFFER_COUNT: usize = 3;
pub const RX_BUFFER_COUNT: usize = 2;

// CANSTAT / CANCTRL fields
pub const OPMOD_MASK: u8 = 0xE0;               // OPMOD (CANSTAT) and REQOP (CANCTRL), bits 7..5
pub const ICOD_MASK: u8 = 0x0E;                // Interrupt flag code, CANSTAT only
pub const CANCTRL_ABAT: u8 = 0x10;             // Abort all pending transmissions
pub const CANCTRL_OSM: u8 = 0x08;              // One-shot mode

// Bit timing: 0xB8 sets BTLMODE with PHSEG1 = 7, PRSEG = 0
pub const CNF1_VALUE: u8 = 0x00;               // SJW = 1 TQ, baud rate prescaler = 0
pub const CNF2_VALUE: u8 = 0xB8;
pub const CNF3_VALUE: u8 = 0x05;               // PHSEG2 = 5

// CANINTE bits
pub const CANINTE_RX0IE: u8 = 0x01;
pub const CANINTE_RX1IE: u8 = 0x02;
pub const CANINTE_TX0IE: u8 = 0x04;
pub const CANINTE_TX1IE: u8 = 0x08;
pub const CANINTE_TX2IE: u8 = 0x10;
pub const CANINTE_ERRIE: u8 = 0x20;
pub const CANINTE_WAKIE: u8 = 0x40;
pub const CANINTE_MERRE: u8 = 0x80;
pub const CANINTE_VALUE: u8 = CANINTE_RX0IE | CANINTE_RX1IE;

// CANINTF flag-clear masks, meant to be ANDed into the current flags
pub const CANINTF_CLEAR_ALL: u8 = 0x00;
pub const CANINTF_CLEAR_MERRF: u8 = 0x7F;
pub const CANINTF_CLEAR_WAKIF: u8 = 0xBF;
pub const CANINTF_CLEAR_ERRIF: u8 = 0xDF;
pub const CANINTF_CLEAR_TX2IF: u8 = 0xEF;
pub const CANINTF_CLEAR_TX1IF: u8 = 0xF7;
pub const CANINTF_CLEAR_TX0IF: u8 = 0xFB;
pub const CANINTF_CLEAR_RX1IF: u8 = 0xFD;
pub const CANINTF_CLEAR_RX0IF: u8 = 0xFE;

// RXBnCTRL: RXM = 0b11 turns masks and filters off, every frame is accepted
pub const RXBCTRL_RXM_ANY: u8 = 0x60;
pub const RXB0CTRL_VALUE: u8 = RXBCTRL_RXM_ANY;
pub const RXB1CTRL_VALUE: u8 = RXBCTRL_RXM_ANY;

// Transmit identifier: standard id 0x009, EXIDE cleared
pub const TXB_SIDH_VALUE: u8 = 0x01;
pub const TXB_SIDL_VALUE: u8 = 0x20;
pub const TXB_SIDL_EXIDE: u8 = 0x08;

// Message sizes used by the application
pub const MESSAGE_SIZE_PWM: u8 = 0x03;
pub const MESSAGE_SIZE_ADXL: u8 = 0x07;        // Sensor data plus one identifier byte
pub const DLC_MASK: u8 = 0x0F;

// TXBnCTRL bits
pub const TXBCTRL_TXREQ: u8 = 0x08;            // Set by RTS, cleared once the frame is sent

const fn data_block(first: u8) -> [u8; DATA_LEN] {
    let mut block = [0u8; DATA_LEN];
    let mut i = 0;
    while i < DATA_LEN {
        block[i] = first + i as u8;
        i += 1;
    }
    block
}

/// Data byte addresses, indexed by transmit buffer and byte offset.
pub const TXB_DATA: [[u8; DATA_LEN]; TX_BUFFER_COUNT] = [
    data_block(TXB0D0_REG),
    data_block(TXB1D0_REG),
    data_block(TXB2D0_REG),
];

/// Data byte addresses, indexed by receive buffer and byte offset.
pub const RXB_DATA: [[u8; DATA_LEN]; RX_BUFFER_COUNT] = [
    data_block(RXB0D0_REG),
    data_block(RXB1D0_REG),
];

/// Register block of one transmit buffer.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TxBufferRegisters {
    pub ctrl: u8,
    pub sidh: u8,
    pub sidl: u8,
    pub dlc: u8,
    pub data: [u8; DATA_LEN],
}

pub const TX_BUFFERS: [TxBufferRegisters; TX_BUFFER_COUNT] = [
    TxBufferRegisters {
        ctrl: TXB0CTRL_REG,
        sidh: TXB0SIDH_REG,
        sidl: TXB0SIDL_REG,
        dlc: TXB0DLC_REG,
        data: TXB_DATA[0],
    },
    TxBufferRegisters {
        ctrl: TXB1CTRL_REG,
        sidh: TXB1SIDH_REG,
        sidl: TXB1SIDL_REG,
        dlc: TXB1DLC_REG,
        data: TXB_DATA[1],
    },
    TxBufferRegisters {
        ctrl: TXB2CTRL_REG,
        sidh: TXB2SIDH_REG,
        sidl: TXB2SIDL_REG,
        dlc: TXB2DLC_REG,
        data: TXB_DATA[2],
    },
];

/// Address of data byte `offset` in transmit buffer `buffer`, `None` past the last byte.
pub fn tx_data_register(buffer: TxBufferId, offset: usize) -> Option<u8> {
    TXB_DATA[buffer.index()].get(offset).copied()
}

/// Address of data byte `offset` in receive buffer `buffer`, `None` past the last byte.
pub fn rx_data_register(buffer: RxBufferId, offset: usize) -> Option<u8> {
    RXB_DATA[buffer.index()].get(offset).copied()
}
