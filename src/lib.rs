#![cfg_attr(not(test), no_std)]
// src/lib.rs

pub mod buffers;
pub mod bus;
pub mod commands;
pub mod config;
pub mod errors;
pub mod mcp2515;
pub mod modes;
pub mod registers;

pub use buffers::{RxBufferId, TxBufferId};
pub use bus::{CommandBus, SpiCommandBus};
pub use config::Config;
pub use errors::Mcp2515Error;
pub use mcp2515::{ErrorCounters, Mcp2515};
pub use modes::OperatingMode;
