use crate::modes::OperatingMode;
use crate::registers::MESSAGE_SIZE_PWM;

/// Everything the driver needs to know up front.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Poll budget for one reset attempt, in milliseconds.
    pub max_wait_ms: u32,
    /// How many reset attempts before giving up.
    pub reset_attempts: u8,
    /// Poll budget for confirming a mode switch, in milliseconds.
    pub mode_switch_wait_ms: u32,
    /// Mode entered at the end of `init`.
    pub operating_mode: OperatingMode,
    /// Data length code programmed into every transmit buffer.
    pub message_size: u8,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_wait_ms: 50,
            reset_attempts: 3,
            mode_switch_wait_ms: 50,
            operating_mode: OperatingMode::Normal,
            message_size: MESSAGE_SIZE_PWM,
            debug: false,
        }
    }
}
