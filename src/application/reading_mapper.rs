// Reading mapper - Translates history API readings into records
use crate::domain::reading::Reading;
use crate::domain::record::{FieldValue, Measurement, NamedField, Record};
use anyhow::{bail, Context};

struct ColumnMapping {
    column: &'static str,
    field: &'static str,
    /// Integer column whose live counterpart is a decimal.
    integer_as_decimal: bool,
}

const fn column(column: &'static str, field: &'static str) -> ColumnMapping {
    ColumnMapping {
        column,
        field,
        integer_as_decimal: false,
    }
}

const fn integer_column(column: &'static str, field: &'static str) -> ColumnMapping {
    ColumnMapping {
        column,
        field,
        integer_as_decimal: true,
    }
}

/// DSMR-reader column names and the telegram field names they are stored as.
const READING_FIELD_MAP: [ColumnMapping; 18] = [
    column("electricity_delivered_1", "electricity_used_tariff_1"),
    column("electricity_returned_1", "electricity_delivered_tariff_1"),
    column("electricity_delivered_2", "electricity_used_tariff_2"),
    column("electricity_returned_2", "electricity_delivered_tariff_2"),
    column("electricity_currently_delivered", "current_electricity_usage"),
    column("electricity_currently_returned", "current_electricity_delivery"),
    column("phase_currently_delivered_l1", "instantaneous_active_power_l1_positive"),
    column("phase_currently_delivered_l2", "instantaneous_active_power_l2_positive"),
    column("phase_currently_delivered_l3", "instantaneous_active_power_l3_positive"),
    column("phase_currently_returned_l1", "instantaneous_active_power_l1_negative"),
    column("phase_currently_returned_l2", "instantaneous_active_power_l2_negative"),
    column("phase_currently_returned_l3", "instantaneous_active_power_l3_negative"),
    column("phase_voltage_l1", "instantaneous_voltage_l1"),
    column("phase_voltage_l2", "instantaneous_voltage_l2"),
    column("phase_voltage_l3", "instantaneous_voltage_l3"),
    integer_column("phase_power_current_l1", "instantaneous_current_l1"),
    integer_column("phase_power_current_l2", "instantaneous_current_l2"),
    integer_column("phase_power_current_l3", "instantaneous_current_l3"),
];

/// Map one reading to a "telegram" record, plus a "gas_meter" record when
/// the reading carries an extra device timestamp.
pub fn reading_to_records(reading: &Reading) -> anyhow::Result<Vec<Record>> {
    let mut fields = Vec::with_capacity(READING_FIELD_MAP.len());
    for mapping in &READING_FIELD_MAP {
        let Some(value) = reading.column(mapping.column) else {
            continue;
        };
        let value = normalize(value, mapping.integer_as_decimal)
            .with_context(|| format!("Invalid value for column {}", mapping.column))?;
        fields.push(NamedField::new(mapping.field, value));
    }

    let mut records = vec![Record::new(Measurement::Telegram, reading.timestamp, fields)];

    if let Some(timestamp) = reading.extra_device_timestamp {
        let delivered = reading
            .extra_device_delivered
            .as_ref()
            .filter(|value| !value.is_null())
            .context("Reading has extra_device_timestamp but no extra_device_delivered")?;
        let value = normalize(delivered, true).context("Invalid value for extra_device_delivered")?;
        records.push(Record::new(
            Measurement::GasMeter,
            timestamp,
            vec![NamedField::new("reading", value)],
        ));
    }

    Ok(records)
}

/// Decimal strings become floats, the same type the live decoder produces.
fn normalize(value: &serde_json::Value, integer_as_decimal: bool) -> anyhow::Result<FieldValue> {
    match value {
        serde_json::Value::String(text) => {
            let decimal = text
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Not a decimal: {:?}", text))?;
            Ok(FieldValue::Float(decimal))
        }
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(integer) if integer_as_decimal => Ok(FieldValue::Float(integer as f64)),
            Some(integer) => Ok(FieldValue::Integer(integer)),
            None => number
                .as_f64()
                .map(FieldValue::Float)
                .with_context(|| format!("Unsupported number: {}", number)),
        },
        other => bail!("Unsupported value: {}", other),
    }
}
