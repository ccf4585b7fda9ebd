// Live pipeline - Serial stream to decoded records to the sink
use crate::application::chunk_source::{ascii_chunk, ChunkSource};
use crate::application::field_mapper::map_telegram;
use crate::application::frame_buffer::FrameBuffer;
use crate::application::record_emitter::emit_records;
use crate::application::record_sink::RecordSink;
use crate::application::telegram_decoder::TelegramDecoder;
use crate::domain::record::{NamedField, Record};
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    AwaitingFirstTelegram,
    SteadyState,
}

/// What a single chunk produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChunkOutcome {
    pub telegrams: usize,
    pub rejected: usize,
    pub records: usize,
}

pub struct LivePipeline {
    buffer: FrameBuffer,
    decoder: Arc<dyn TelegramDecoder>,
    sink: Arc<dyn RecordSink>,
    state: PipelineState,
}

impl LivePipeline {
    pub fn new(decoder: Arc<dyn TelegramDecoder>, sink: Arc<dyn RecordSink>) -> Self {
        Self {
            buffer: FrameBuffer::new(),
            decoder,
            sink,
            state: PipelineState::AwaitingFirstTelegram,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Read chunks forever. Only returns on a transport or sink error.
    ///
    /// The read await is not raced against a shutdown signal, so a stop
    /// request is only noticed once the meter sends its next line.
    pub async fn run(&mut self, source: &mut dyn ChunkSource) -> anyhow::Result<()> {
        loop {
            let chunk = source
                .next_chunk()
                .await
                .context("Failed to read from telegram source")?;
            self.process_chunk(&chunk, Utc::now()).await?;
        }
    }

    /// Buffer one chunk and write records for every telegram it completes.
    pub async fn process_chunk(
        &mut self,
        chunk: &[u8],
        received_at: DateTime<Utc>,
    ) -> anyhow::Result<ChunkOutcome> {
        let text = ascii_chunk(chunk)?;
        self.buffer.append(text);

        let mut outcome = ChunkOutcome::default();
        loop {
            let Some(frame) = self.buffer.drain().next() else {
                break;
            };
            match self.handle_frame(&frame, received_at).await? {
                Some(records) => {
                    outcome.telegrams += 1;
                    outcome.records += records;
                }
                None => outcome.rejected += 1,
            }
        }

        Ok(outcome)
    }

    /// Returns the number of records written, or `None` if the frame was
    /// rejected by the decoder.
    async fn handle_frame(
        &mut self,
        frame: &str,
        received_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<usize>> {
        let telegram = match self.decoder.decode(frame) {
            Ok(telegram) => telegram,
            Err(e) => {
                tracing::error!("Telegram parsing failed: {}\n{}", e, frame.escape_debug());
                return Ok(None);
            }
        };

        let mapped = map_telegram(telegram);
        if self.state == PipelineState::AwaitingFirstTelegram {
            tracing::info!("First telegram received: {}", format_fields(&mapped.fields));
            self.state = PipelineState::SteadyState;
        } else {
            tracing::debug!("Telegram received with {} fields", mapped.fields.len());
        }

        let records: Vec<Record> =
            emit_records(mapped.fields, received_at, mapped.sub_devices).collect();
        let count = records.len();
        self.sink
            .write(records)
            .await
            .context("Failed to write telegram records")?;

        Ok(Some(count))
    }
}

fn format_fields(fields: &[NamedField]) -> String {
    fields
        .iter()
        .map(|field| format!("{}={}", field.name, field.value))
        .collect::<Vec<_>>()
        .join(", ")
}
