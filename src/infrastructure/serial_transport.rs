// Serial port transport for the P1 port
use crate::application::chunk_source::ChunkSource;
use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_serial::{DataBits, Parity, SerialPortBuilderExt, SerialStream, StopBits};

/// Named serial settings of the DSMR P1 port versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SerialProfile {
    #[serde(rename = "V2_2")]
    V22,
    V4,
    V5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialSettings {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl SerialProfile {
    pub fn settings(self) -> SerialSettings {
        match self {
            SerialProfile::V22 => SerialSettings {
                baud_rate: 9600,
                data_bits: DataBits::Seven,
                parity: Parity::Even,
                stop_bits: StopBits::One,
            },
            SerialProfile::V4 | SerialProfile::V5 => SerialSettings {
                baud_rate: 115200,
                data_bits: DataBits::Eight,
                parity: Parity::None,
                stop_bits: StopBits::One,
            },
        }
    }
}

/// Yields the P1 stream one line at a time.
pub struct SerialTransport {
    reader: BufReader<SerialStream>,
}

impl SerialTransport {
    pub fn open(device: &str, profile: SerialProfile) -> anyhow::Result<Self> {
        let settings = profile.settings();
        let port = tokio_serial::new(device, settings.baud_rate)
            .data_bits(settings.data_bits)
            .parity(settings.parity)
            .stop_bits(settings.stop_bits)
            .open_native_async()
            .with_context(|| format!("Failed to open serial port {}", device))?;

        tracing::info!(
            "Opened {} at {} baud ({:?}, {:?}, {:?})",
            device,
            settings.baud_rate,
            settings.data_bits,
            settings.parity,
            settings.stop_bits
        );

        Ok(Self {
            reader: BufReader::new(port),
        })
    }
}

#[async_trait]
impl ChunkSource for SerialTransport {
    async fn next_chunk(&mut self) -> anyhow::Result<Vec<u8>> {
        let mut line = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut line)
            .await
            .context("Serial read failed")?;
        if read == 0 {
            bail!("Serial port closed");
        }
        Ok(line)
    }
}
