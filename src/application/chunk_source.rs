// Source trait for raw telegram stream chunks
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TransportError {
    #[error("Non-ASCII byte 0x{byte:02X} at offset {offset} in received chunk")]
    NonAscii { byte: u8, offset: usize },
}

#[async_trait]
pub trait ChunkSource: Send {
    /// Wait for the next chunk of bytes. Errors, including end of stream,
    /// are fatal for the caller.
    async fn next_chunk(&mut self) -> anyhow::Result<Vec<u8>>;
}

/// Chunks are ASCII on the wire; anything else means a misconfigured port.
pub fn ascii_chunk(chunk: &[u8]) -> Result<&str, TransportError> {
    if let Some(offset) = chunk.iter().position(|b| !b.is_ascii()) {
        return Err(TransportError::NonAscii {
            byte: chunk[offset],
            offset,
        });
    }

    Ok(std::str::from_utf8(chunk).unwrap_or_default())
}
