// Application layer - Frame reassembly, mapping and the two driver loops
pub mod chunk_source;
pub mod field_mapper;
pub mod frame_buffer;
pub mod history_import;
pub mod live_pipeline;
pub mod reading_mapper;
pub mod reading_source;
pub mod record_emitter;
pub mod record_sink;
pub mod telegram_decoder;
