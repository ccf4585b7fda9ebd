// Field mapper - Translates decoded telegrams into named fields
use crate::domain::record::{FieldValue, NamedField};
use crate::domain::telegram::{Telegram, TelegramValue};
use chrono::{DateTime, Utc};
use std::fmt;

/// Sub-device readings that are stored as their own measurement.
const SUB_DEVICE_KINDS: [&str; 2] = ["gas_meter_reading", "hourly_gas_meter_reading"];

#[derive(Debug, Clone, PartialEq)]
pub struct SubDeviceRecord {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    UnrecognizedSubDevice,
    NotImplemented,
    UnknownValue,
    Duplicate,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DropReason::UnrecognizedSubDevice => "unrecognized sub-device reading",
            DropReason::NotImplemented => "value type not implemented",
            DropReason::UnknownValue => "unknown value type",
            DropReason::Duplicate => "repeated on another channel",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DroppedField {
    pub name: &'static str,
    pub reason: DropReason,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedTelegram {
    pub fields: Vec<NamedField>,
    pub sub_devices: Vec<SubDeviceRecord>,
    pub dropped: Vec<DroppedField>,
}

/// Split a telegram into main-meter fields and sub-device records.
///
/// Never fails on content: fields that cannot be stored are logged as
/// warnings and reported in `dropped`. Field names are unique; a scalar
/// repeated on a later M-Bus channel keeps its first value.
pub fn map_telegram(telegram: Telegram) -> MappedTelegram {
    let mut mapped = MappedTelegram::default();

    for (reference, value) in telegram {
        let name = reference.name();

        let reason = match value {
            TelegramValue::Scalar(reading) if mapped.field(name).is_some() => {
                tracing::warn!("Dropping repeated field {}: {}", name, reading.value);
                DropReason::Duplicate
            }
            TelegramValue::Scalar(reading) => {
                mapped.fields.push(NamedField::new(name, reading.value));
                continue;
            }
            TelegramValue::SubDevice(reading) if SUB_DEVICE_KINDS.contains(&name) => {
                mapped.sub_devices.push(SubDeviceRecord {
                    timestamp: reading.timestamp,
                    value: reading.value,
                });
                continue;
            }
            TelegramValue::SubDevice(reading) => {
                tracing::warn!("Dropping unrecognized sub-device reading {}: {:?}", name, reading);
                DropReason::UnrecognizedSubDevice
            }
            TelegramValue::EventLog(events) => {
                tracing::warn!(
                    "Event log {} is not implemented, dropping {} entries",
                    name,
                    events.len()
                );
                DropReason::NotImplemented
            }
            TelegramValue::Unknown(raw) => {
                tracing::warn!("Dropping {} with unknown value type: {}", name, raw);
                DropReason::UnknownValue
            }
        };

        mapped.dropped.push(DroppedField { name, reason });
    }

    mapped
}

impl MappedTelegram {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::obis::ObisReference;
    use crate::domain::telegram::{PowerFailureEvent, ScalarReading, SubDeviceReading};
    use chrono::TimeZone;

    fn scalar(value: FieldValue, unit: Option<&str>) -> TelegramValue {
        TelegramValue::Scalar(ScalarReading {
            value,
            unit: unit.map(str::to_string),
        })
    }

    fn gas(value: f64) -> TelegramValue {
        TelegramValue::SubDevice(SubDeviceReading {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap(),
            value,
            unit: Some("m3".to_string()),
        })
    }

    #[test]
    fn test_scalars_become_named_fields() {
        let telegram = Telegram::new(vec![
            (
                ObisReference::CurrentElectricityUsage,
                scalar(FieldValue::Float(1.234), Some("kW")),
            ),
            (
                ObisReference::ShortPowerFailureCount,
                scalar(FieldValue::Integer(4), None),
            ),
            (
                ObisReference::EquipmentIdentifier,
                scalar(FieldValue::Text("4B384547".to_string()), None),
            ),
        ]);

        let mapped = map_telegram(telegram);

        assert_eq!(mapped.fields.len(), 3);
        assert_eq!(
            mapped.field("current_electricity_usage"),
            Some(&FieldValue::Float(1.234))
        );
        assert_eq!(
            mapped.field("short_power_failure_count"),
            Some(&FieldValue::Integer(4))
        );
        assert!(mapped.sub_devices.is_empty());
        assert!(mapped.dropped.is_empty());
    }

    #[test]
    fn test_gas_reading_becomes_sub_device_record() {
        let telegram = Telegram::new(vec![(ObisReference::HourlyGasMeterReading, gas(123.456))]);

        let mapped = map_telegram(telegram);

        assert!(mapped.fields.is_empty());
        assert_eq!(
            mapped.sub_devices,
            vec![SubDeviceRecord {
                timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap(),
                value: 123.456,
            }]
        );
    }

    #[test]
    fn test_multiple_sub_devices_are_kept() {
        let telegram = Telegram::new(vec![
            (ObisReference::GasMeterReading, gas(1.0)),
            (ObisReference::HourlyGasMeterReading, gas(2.0)),
        ]);

        let mapped = map_telegram(telegram);

        assert_eq!(mapped.sub_devices.len(), 2);
    }

    #[test]
    fn test_unrecognized_sub_device_is_dropped() {
        let telegram = Telegram::new(vec![
            (
                ObisReference::CurrentElectricityUsage,
                scalar(FieldValue::Float(0.5), Some("kW")),
            ),
            (ObisReference::DeviceType, gas(9.0)),
        ]);

        let mapped = map_telegram(telegram);

        assert_eq!(mapped.fields.len(), 1);
        assert!(mapped.sub_devices.is_empty());
        assert_eq!(
            mapped.dropped,
            vec![DroppedField {
                name: "device_type",
                reason: DropReason::UnrecognizedSubDevice,
            }]
        );
    }

    #[test]
    fn test_event_log_and_unknown_are_dropped() {
        let telegram = Telegram::new(vec![
            (
                ObisReference::PowerEventFailureLog,
                TelegramValue::EventLog(vec![PowerFailureEvent {
                    ended_at: Utc.with_ymd_and_hms(2010, 12, 8, 14, 24, 15).unwrap(),
                    duration_secs: 240,
                }]),
            ),
            (
                ObisReference::ActualSwitchPosition,
                TelegramValue::Unknown("1".to_string()),
            ),
        ]);

        let mapped = map_telegram(telegram);

        assert!(mapped.fields.is_empty());
        assert_eq!(
            mapped.dropped,
            vec![
                DroppedField {
                    name: "power_event_failure_log",
                    reason: DropReason::NotImplemented,
                },
                DroppedField {
                    name: "actual_switch_position",
                    reason: DropReason::UnknownValue,
                },
            ]
        );
    }

    #[test]
    fn test_second_channel_keeps_first_value() {
        let telegram = Telegram::new(vec![
            (
                ObisReference::CurrentElectricityUsage,
                scalar(FieldValue::Float(0.5), Some("kW")),
            ),
            (ObisReference::DeviceType, scalar(FieldValue::Integer(3), None)),
            (
                ObisReference::EquipmentIdentifierGas,
                scalar(FieldValue::Text("4730303339".to_string()), None),
            ),
            (ObisReference::HourlyGasMeterReading, gas(10.0)),
            (ObisReference::DeviceType, scalar(FieldValue::Integer(7), None)),
            (
                ObisReference::EquipmentIdentifierGas,
                scalar(FieldValue::Text("5730303339".to_string()), None),
            ),
            (ObisReference::HourlyGasMeterReading, gas(20.0)),
        ]);

        let mapped = map_telegram(telegram);

        let names: Vec<_> = mapped.fields.iter().map(|field| field.name.as_str()).collect();
        assert_eq!(
            names,
            ["current_electricity_usage", "device_type", "equipment_identifier_gas"]
        );
        assert_eq!(mapped.field("device_type"), Some(&FieldValue::Integer(3)));
        assert_eq!(
            mapped.field("equipment_identifier_gas"),
            Some(&FieldValue::Text("4730303339".to_string()))
        );
        assert_eq!(mapped.sub_devices.len(), 2);
        assert_eq!(
            mapped.dropped,
            vec![
                DroppedField {
                    name: "device_type",
                    reason: DropReason::Duplicate,
                },
                DroppedField {
                    name: "equipment_identifier_gas",
                    reason: DropReason::Duplicate,
                },
            ]
        );
    }
}
