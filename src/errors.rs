use core::fmt::{Debug, Formatter, Result};
use ufmt::{uDebug, uWrite};

#[derive(PartialEq, Clone, Copy)]
pub enum Mcp2515Error {
    CommunicationError,
    Timeout,
    ResetFailed,          // Configuration mode never confirmed, chip unusable
    InvalidBuffer,
    InvalidByteOffset,
    MessageTooLong,
    BufferNotInitialized,
    InvalidArgument,      // Malformed bus request, such as a burst without data
}

impl Debug for Mcp2515Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Mcp2515Error::CommunicationError => write!(f, "CommunicationError"),
            Mcp2515Error::Timeout => write!(f, "Timeout"),
            Mcp2515Error::ResetFailed => write!(f, "ResetFailed"),
            Mcp2515Error::InvalidBuffer => write!(f, "InvalidBuffer"),
            Mcp2515Error::InvalidByteOffset => write!(f, "InvalidByteOffset"),
            Mcp2515Error::MessageTooLong => write!(f, "MessageTooLong"),
            Mcp2515Error::BufferNotInitialized => write!(f, "BufferNotInitialized"),
            Mcp2515Error::InvalidArgument => write!(f, "InvalidArgument"),
        }
    }
}

impl uDebug for Mcp2515Error {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<W>) -> core::result::Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            Mcp2515Error::CommunicationError => f.write_str("CommunicationError"),
            Mcp2515Error::Timeout => f.write_str("Timeout"),
            Mcp2515Error::ResetFailed => f.write_str("ResetFailed"),
            Mcp2515Error::InvalidBuffer => f.write_str("InvalidBuffer"),
            Mcp2515Error::InvalidByteOffset => f.write_str("InvalidByteOffset"),
            Mcp2515Error::MessageTooLong => f.write_str("MessageTooLong"),
            Mcp2515Error::BufferNotInitialized => f.write_str("BufferNotInitialized"),
            Mcp2515Error::InvalidArgument => f.write_str("InvalidArgument"),
        }
    }
}
