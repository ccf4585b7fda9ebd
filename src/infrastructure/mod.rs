// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod dsmr_reader_client;
pub mod influx_sink;
pub mod p1_decoder;
pub mod serial_transport;
