// Domain layer - Meter data independent of transport and storage
pub mod obis;
pub mod reading;
pub mod record;
pub mod telegram;
