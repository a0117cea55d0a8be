#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::delay::DelayNs;
use mcp2515_can::commands::INSTRUCTION_RESET;
use mcp2515_can::registers::{CANCTRL_REG, CANSTAT_REG, OPMOD_MASK};
use mcp2515_can::{CommandBus, Config, Mcp2515, Mcp2515Error};
use ufmt::uWrite;

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Write(u8, u8),
    Burst(Vec<u8>),
    Read(u8),
    ReadBurst(u8, usize),
    Instruction(u8),
    ReadStatus,
}

/// Register store standing in for the chip.
pub struct MockBus {
    pub registers: [u8; 128],
    pub ops: Vec<Op>,
    /// Answers for CANSTAT reads, used before falling back to the store.
    pub canstat_script: VecDeque<u8>,
    /// Configuration mode shows up after this many reset instructions.
    pub resets_until_config: Option<usize>,
    /// Copy requested modes from CANCTRL into CANSTAT.
    pub follow_canctrl: bool,
    pub status: u8,
    resets: usize,
}

impl MockBus {
    pub fn new() -> Self {
        MockBus {
            registers: [0; 128],
            ops: Vec::new(),
            canstat_script: VecDeque::new(),
            resets_until_config: Some(1),
            follow_canctrl: true,
            status: 0,
            resets: 0,
        }
    }

    /// A chip that reports configuration mode only after `resets` reset instructions.
    pub fn acknowledging_after(resets: usize) -> Self {
        MockBus {
            resets_until_config: Some(resets),
            ..MockBus::new()
        }
    }

    /// A chip that never leaves normal mode after reset.
    pub fn dead() -> Self {
        MockBus {
            resets_until_config: None,
            ..MockBus::new()
        }
    }

    pub fn count(&self, op: &Op) -> usize {
        self.ops.iter().filter(|o| *o == op).count()
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Write(address, value) => Some((*address, *value)),
                _ => None,
            })
            .collect()
    }

    pub fn canstat_reads(&self) -> usize {
        self.count(&Op::Read(CANSTAT_REG))
    }
}

impl CommandBus for MockBus {
    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Mcp2515Error> {
        self.ops.push(Op::Write(address, value));
        self.registers[address as usize] = value;
        if address == CANCTRL_REG && self.follow_canctrl {
            self.registers[CANSTAT_REG as usize] = value & OPMOD_MASK;
        }
        Ok(())
    }

    fn write_register_burst(&mut self, bytes: &[u8]) -> Result<(), Mcp2515Error> {
        if bytes.len() < 2 {
            return Err(Mcp2515Error::InvalidArgument);
        }
        self.ops.push(Op::Burst(bytes.to_vec()));
        let first = bytes[0] as usize;
        for (i, value) in bytes[1..].iter().enumerate() {
            self.registers[first + i] = *value;
        }
        Ok(())
    }

    fn read_register(&mut self, address: u8) -> Result<u8, Mcp2515Error> {
        self.ops.push(Op::Read(address));
        if address == CANSTAT_REG {
            if let Some(value) = self.canstat_script.pop_front() {
                return Ok(value);
            }
        }
        Ok(self.registers[address as usize])
    }

    fn read_burst(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Mcp2515Error> {
        self.ops.push(Op::ReadBurst(address, buffer.len()));
        let first = address as usize;
        buffer.copy_from_slice(&self.registers[first..first + buffer.len()]);
        Ok(())
    }

    fn send_instruction(&mut self, opcode: u8) -> Result<(), Mcp2515Error> {
        self.ops.push(Op::Instruction(opcode));
        if opcode == INSTRUCTION_RESET {
            self.resets += 1;
            if let Some(needed) = self.resets_until_config {
                if self.resets >= needed {
                    self.registers[CANSTAT_REG as usize] = 0x80;
                }
            }
        }
        Ok(())
    }

    fn read_status(&mut self) -> Result<u8, Mcp2515Error> {
        self.ops.push(Op::ReadStatus);
        Ok(self.status)
    }
}

/// Counts requested delay instead of sleeping.
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

/// Collects log output.
#[derive(Default)]
pub struct Log(pub String);

impl uWrite for Log {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.0.push_str(s);
        Ok(())
    }
}

pub fn driver(bus: MockBus) -> Mcp2515<MockBus, MockDelay> {
    Mcp2515::new(bus, MockDelay::default(), Config::default())
}

pub fn driver_with(bus: MockBus, config: Config) -> Mcp2515<MockBus, MockDelay> {
    Mcp2515::new(bus, MockDelay::default(), config)
}
