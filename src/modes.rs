use core::fmt::{Debug, Formatter, Result};
use ufmt::{uDebug, uWrite};

use crate::registers::{CANCTRL_OSM, OPMOD_MASK};

const CONFIGURATION_BIT: u8 = 0x80;

/// Operating modes of the controller.
///
/// The same bit pattern requests a mode through CANCTRL and reports it
/// through CANSTAT. One-shot mode is a CANCTRL option on top of normal
/// mode, so CANSTAT reports it as plain normal mode.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    Configuration,
    Normal,
    NormalWithOneShot,
    Sleep,
    Loopback,
    ListenOnly,
}

impl OperatingMode {
    /// Value written to CANCTRL to request this mode.
    pub const fn bits(self) -> u8 {
        match self {
            OperatingMode::Normal => 0x00,
            OperatingMode::NormalWithOneShot => CANCTRL_OSM,
            OperatingMode::Sleep => 0x20,
            OperatingMode::Loopback => 0x40,
            OperatingMode::ListenOnly => 0x60,
            OperatingMode::Configuration => 0x80,
        }
    }

    /// True when a CANSTAT value shows this mode.
    ///
    /// Configuration mode only needs its OPMOD bit set; every other mode
    /// needs the whole OPMOD field to match.
    pub fn is_reflected_by(self, status: u8) -> bool {
        match self {
            OperatingMode::Configuration => status & CONFIGURATION_BIT == CONFIGURATION_BIT,
            _ => status & OPMOD_MASK == self.bits() & OPMOD_MASK,
        }
    }

    /// Decodes the OPMOD field of a CANSTAT value.
    pub fn from_status(status: u8) -> Option<OperatingMode> {
        match status & OPMOD_MASK {
            0x00 => Some(OperatingMode::Normal),
            0x20 => Some(OperatingMode::Sleep),
            0x40 => Some(OperatingMode::Loopback),
            0x60 => Some(OperatingMode::ListenOnly),
            0x80 => Some(OperatingMode::Configuration),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            OperatingMode::Configuration => "Configuration",
            OperatingMode::Normal => "Normal",
            OperatingMode::NormalWithOneShot => "NormalWithOneShot",
            OperatingMode::Sleep => "Sleep",
            OperatingMode::Loopback => "Loopback",
            OperatingMode::ListenOnly => "ListenOnly",
        }
    }
}

impl Debug for OperatingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.name())
    }
}

impl uDebug for OperatingMode {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<W>) -> core::result::Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(self.name())
    }
}
