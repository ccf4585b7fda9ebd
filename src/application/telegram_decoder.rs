// Decoder trait for complete telegram frames
use crate::domain::telegram::Telegram;
use thiserror::Error;

/// Reasons a single frame is rejected. Both are recoverable: the frame is
/// dropped and the pipeline moves on.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("Invalid checksum: expected {expected:04X}, calculated {calculated:04X}")]
    InvalidChecksum { expected: u16, calculated: u16 },

    #[error("Telegram parse error: {0}")]
    Parse(String),
}

pub trait TelegramDecoder: Send + Sync {
    /// Decode one complete frame as produced by the frame buffer.
    fn decode(&self, frame: &str) -> Result<Telegram, DecodeError>;
}
