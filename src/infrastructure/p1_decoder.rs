// DSMR P1 telegram decoder
use crate::application::telegram_decoder::{DecodeError, TelegramDecoder};
use crate::domain::obis::ObisReference;
use crate::domain::record::FieldValue;
use crate::domain::telegram::{
    PowerFailureEvent, ScalarReading, SubDeviceReading, Telegram, TelegramValue,
};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use crc::{Crc, CRC_16_ARC};
use serde::Deserialize;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_ARC);

/// DSMR telegram specification version the meter speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TelegramSpecification {
    #[serde(rename = "V2_2")]
    V22,
    V3,
    V4,
    V5,
}

impl TelegramSpecification {
    fn checksum_required(self) -> bool {
        matches!(self, Self::V4 | Self::V5)
    }

    fn supports(self, reference: ObisReference) -> bool {
        use ObisReference::*;

        match self {
            Self::V22 | Self::V3 => matches!(
                reference,
                EquipmentIdentifier
                    | ElectricityUsedTariff1
                    | ElectricityUsedTariff2
                    | ElectricityDeliveredTariff1
                    | ElectricityDeliveredTariff2
                    | ElectricityActiveTariff
                    | CurrentElectricityUsage
                    | CurrentElectricityDelivery
                    | ActualThresholdElectricity
                    | ActualSwitchPosition
                    | TextMessageCode
                    | TextMessage
                    | EquipmentIdentifierGas
                    | DeviceType
                    | ValvePositionGas
                    | GasMeterReading
            ),
            Self::V4 => reference == TextMessageCode || is_v4_v5_reference(reference),
            Self::V5 => {
                matches!(
                    reference,
                    InstantaneousVoltageL1 | InstantaneousVoltageL2 | InstantaneousVoltageL3
                ) || is_v4_v5_reference(reference)
            }
        }
    }
}

fn is_v4_v5_reference(reference: ObisReference) -> bool {
    use ObisReference::*;

    matches!(
        reference,
        P1MessageHeader
            | P1MessageTimestamp
            | EquipmentIdentifier
            | ElectricityUsedTariff1
            | ElectricityUsedTariff2
            | ElectricityDeliveredTariff1
            | ElectricityDeliveredTariff2
            | ElectricityActiveTariff
            | CurrentElectricityUsage
            | CurrentElectricityDelivery
            | ShortPowerFailureCount
            | LongPowerFailureCount
            | PowerEventFailureLog
            | VoltageSagL1Count
            | VoltageSagL2Count
            | VoltageSagL3Count
            | VoltageSwellL1Count
            | VoltageSwellL2Count
            | VoltageSwellL3Count
            | TextMessage
            | DeviceType
            | InstantaneousCurrentL1
            | InstantaneousCurrentL2
            | InstantaneousCurrentL3
            | InstantaneousActivePowerL1Positive
            | InstantaneousActivePowerL2Positive
            | InstantaneousActivePowerL3Positive
            | InstantaneousActivePowerL1Negative
            | InstantaneousActivePowerL2Negative
            | InstantaneousActivePowerL3Negative
            | EquipmentIdentifierGas
            | HourlyGasMeterReading
    )
}

/// How the value groups following a reference are laid out.
enum ValueKind {
    Decimal,
    Integer,
    Text,
    Timestamp,
    SubDevice,
    /// V2.2/V3 gas reading, value on a continuation line
    LegacyGas,
    EventLog,
    Raw,
}

fn value_kind(reference: ObisReference) -> ValueKind {
    use ObisReference::*;

    match reference {
        P1MessageHeader
        | EquipmentIdentifier
        | ElectricityActiveTariff
        | TextMessageCode
        | TextMessage
        | EquipmentIdentifierGas => ValueKind::Text,
        P1MessageTimestamp => ValueKind::Timestamp,
        ElectricityUsedTariff1
        | ElectricityUsedTariff2
        | ElectricityDeliveredTariff1
        | ElectricityDeliveredTariff2
        | CurrentElectricityUsage
        | CurrentElectricityDelivery
        | ActualThresholdElectricity
        | InstantaneousVoltageL1
        | InstantaneousVoltageL2
        | InstantaneousVoltageL3
        | InstantaneousCurrentL1
        | InstantaneousCurrentL2
        | InstantaneousCurrentL3
        | InstantaneousActivePowerL1Positive
        | InstantaneousActivePowerL2Positive
        | InstantaneousActivePowerL3Positive
        | InstantaneousActivePowerL1Negative
        | InstantaneousActivePowerL2Negative
        | InstantaneousActivePowerL3Negative => ValueKind::Decimal,
        ShortPowerFailureCount
        | LongPowerFailureCount
        | VoltageSagL1Count
        | VoltageSagL2Count
        | VoltageSagL3Count
        | VoltageSwellL1Count
        | VoltageSwellL2Count
        | VoltageSwellL3Count
        | DeviceType => ValueKind::Integer,
        HourlyGasMeterReading => ValueKind::SubDevice,
        GasMeterReading => ValueKind::LegacyGas,
        PowerEventFailureLog => ValueKind::EventLog,
        ActualSwitchPosition | ValvePositionGas => ValueKind::Raw,
    }
}

/// Decodes P1 port telegrams of one specification version.
#[derive(Debug, Clone)]
pub struct P1Decoder {
    specification: TelegramSpecification,
}

impl P1Decoder {
    pub fn new(specification: TelegramSpecification) -> Self {
        Self { specification }
    }
}

impl TelegramDecoder for P1Decoder {
    fn decode(&self, frame: &str) -> Result<Telegram, DecodeError> {
        if self.specification.checksum_required() {
            verify_checksum(frame)?;
        }

        let mut fields = Vec::new();
        for line in logical_lines(frame) {
            if line.starts_with('/') || line.starts_with('!') {
                continue;
            }
            let Some(open) = line.find('(') else {
                continue;
            };
            let Some(reference) = ObisReference::from_code(&line[..open]) else {
                tracing::trace!("Ignoring unknown reference in line {:?}", line);
                continue;
            };
            if !self.specification.supports(reference) {
                continue;
            }

            let raw = &line[open..];
            let value = parse_value(reference, raw).map_err(|reason| {
                DecodeError::Parse(format!("{} in line {:?}", reason, line))
            })?;
            fields.push((reference, value));
        }

        Ok(Telegram::new(fields))
    }
}

/// CRC16 over everything from `/` up to and including `!`, compared with
/// the four hex digits after `!`.
fn verify_checksum(frame: &str) -> Result<(), DecodeError> {
    let missing = || {
        DecodeError::Parse(
            "Failed to perform CRC validation because the telegram is incomplete".to_string(),
        )
    };

    let start = frame.find('/').ok_or_else(missing)?;
    let bang = frame.rfind('!').filter(|bang| *bang > start).ok_or_else(missing)?;
    let digits = frame[bang + 1..].get(..4).ok_or_else(missing)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(missing());
    }
    let expected = u16::from_str_radix(digits, 16).map_err(|_| missing())?;

    let calculated = CRC16.checksum(frame[start..=bang].as_bytes());
    if calculated != expected {
        return Err(DecodeError::InvalidChecksum {
            expected,
            calculated,
        });
    }

    Ok(())
}

/// Lines of the frame, with continuation lines starting with `(` joined to
/// the line before them.
fn logical_lines(frame: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for line in frame.lines() {
        match lines.last_mut() {
            Some(previous) if line.starts_with('(') => previous.push_str(line),
            _ => lines.push(line.to_string()),
        }
    }
    lines
}

/// Split `(a)(b)(c)` into its groups.
fn value_groups(raw: &str) -> Result<Vec<&str>, String> {
    let mut groups = Vec::new();
    let mut rest = raw.trim_end();

    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('(')
            .ok_or_else(|| format!("expected '(' at {:?}", rest))?;
        let close = inner
            .find(')')
            .ok_or_else(|| "unterminated value group".to_string())?;
        groups.push(&inner[..close]);
        rest = &inner[close + 1..];
    }

    Ok(groups)
}

fn parse_value(reference: ObisReference, raw: &str) -> Result<TelegramValue, String> {
    let groups = value_groups(raw)?;

    let value = match value_kind(reference) {
        ValueKind::Decimal => {
            let (value, unit) = parse_decimal(single(&groups)?)?;
            scalar(FieldValue::Float(value), unit)
        }
        ValueKind::Integer => {
            let (digits, unit) = split_unit(single(&groups)?);
            let value = digits
                .parse::<i64>()
                .map_err(|_| format!("invalid integer {:?}", digits))?;
            scalar(FieldValue::Integer(value), unit)
        }
        ValueKind::Text => scalar(FieldValue::Text(single(&groups)?.to_string()), None),
        ValueKind::Timestamp => {
            let timestamp = parse_timestamp(single(&groups)?)?;
            scalar(FieldValue::Text(timestamp.to_rfc3339()), None)
        }
        ValueKind::SubDevice => match groups.as_slice() {
            [timestamp, reading] => {
                let (value, unit) = parse_decimal(reading)?;
                TelegramValue::SubDevice(SubDeviceReading {
                    timestamp: parse_timestamp(timestamp)?,
                    value,
                    unit,
                })
            }
            _ => return Err(format!("expected 2 values, found {}", groups.len())),
        },
        ValueKind::LegacyGas => match groups.as_slice() {
            [timestamp, _, _, _, _, unit, reading] => {
                let (value, _) = parse_decimal(reading)?;
                TelegramValue::SubDevice(SubDeviceReading {
                    timestamp: parse_timestamp(timestamp)?,
                    value,
                    unit: Some(unit.to_string()).filter(|unit| !unit.is_empty()),
                })
            }
            _ => return Err(format!("expected 7 values, found {}", groups.len())),
        },
        ValueKind::EventLog => TelegramValue::EventLog(parse_event_log(&groups)?),
        ValueKind::Raw => TelegramValue::Unknown(raw.trim_end().to_string()),
    };

    Ok(value)
}

fn scalar(value: FieldValue, unit: Option<String>) -> TelegramValue {
    TelegramValue::Scalar(ScalarReading { value, unit })
}

fn single<'a>(groups: &[&'a str]) -> Result<&'a str, String> {
    match groups {
        [value] => Ok(*value),
        _ => Err(format!("expected 1 value, found {}", groups.len())),
    }
}

fn split_unit(raw: &str) -> (&str, Option<String>) {
    match raw.split_once('*') {
        Some((value, unit)) => (value, Some(unit.to_string())),
        None => (raw, None),
    }
}

fn parse_decimal(raw: &str) -> Result<(f64, Option<String>), String> {
    let (digits, unit) = split_unit(raw);
    let value = digits
        .parse::<f64>()
        .map_err(|_| format!("invalid decimal {:?}", digits))?;
    Ok((value, unit))
}

/// `YYMMDDhhmmssX`, local Dutch time where X is `S` (summer, UTC+2) or
/// `W` (winter, UTC+1). Older meters omit X; those are read as winter time.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let invalid = || format!("invalid timestamp {:?}", raw);
    if !raw.is_ascii() {
        return Err(invalid());
    }

    let (local, season) = match raw.len() {
        12 => (raw, None),
        13 => (&raw[..12], raw[12..].chars().next()),
        _ => return Err(invalid()),
    };
    let hours = match season {
        Some('S') => 2,
        Some('W') | None => 1,
        Some(_) => return Err(invalid()),
    };

    let naive = NaiveDateTime::parse_from_str(local, "%y%m%d%H%M%S").map_err(|_| invalid())?;
    let offset = FixedOffset::east_opt(hours * 3600).ok_or_else(invalid)?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .ok_or_else(invalid)
}

/// `(count)(0-0:96.7.19)(end)(duration*s)...`
fn parse_event_log(groups: &[&str]) -> Result<Vec<PowerFailureEvent>, String> {
    let (count, entries) = match groups {
        [] | [""] => return Ok(Vec::new()),
        [count, _, entries @ ..] => (count, entries),
        _ => return Err("incomplete event log".to_string()),
    };

    let count = count
        .parse::<usize>()
        .map_err(|_| format!("invalid event count {:?}", count))?;
    if count.checked_mul(2) != Some(entries.len()) {
        return Err(format!(
            "event log announces {} entries, found {} values",
            count,
            entries.len()
        ));
    }

    entries
        .chunks(2)
        .map(|pair| -> Result<PowerFailureEvent, String> {
            let (digits, _) = split_unit(pair[1]);
            Ok(PowerFailureEvent {
                ended_at: parse_timestamp(pair[0])?,
                duration_secs: digits
                    .parse::<i64>()
                    .map_err(|_| format!("invalid duration {:?}", pair[1]))?,
            })
        })
        .collect()
}
