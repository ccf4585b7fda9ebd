// Record emitter - Builds time-series records from mapped telegrams
use crate::application::field_mapper::SubDeviceRecord;
use crate::domain::record::{FieldValue, Measurement, NamedField, Record};
use chrono::{DateTime, Utc};

/// One "telegram" record stamped with the ingestion time, followed by one
/// "gas_meter" record per sub-device reading stamped with its own time.
pub fn emit_records(
    fields: Vec<NamedField>,
    ingested_at: DateTime<Utc>,
    sub_devices: Vec<SubDeviceRecord>,
) -> impl Iterator<Item = Record> {
    let main = Record::new(Measurement::Telegram, ingested_at, fields);

    std::iter::once(main).chain(sub_devices.into_iter().map(|reading| {
        Record::new(
            Measurement::GasMeter,
            reading.timestamp,
            vec![NamedField::new("reading", FieldValue::Float(reading.value))],
        )
    }))
}
