// Decoded telegram domain model
use super::obis::ObisReference;
use super::record::FieldValue;
use chrono::{DateTime, Utc};

/// Instantaneous reading of the main meter.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarReading {
    pub value: FieldValue,
    pub unit: Option<String>,
}

/// Reading relayed from an auxiliary meter (gas, water), carrying the
/// timestamp at which that meter captured it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubDeviceReading {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerFailureEvent {
    pub ended_at: DateTime<Utc>,
    pub duration_secs: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TelegramValue {
    Scalar(ScalarReading),
    SubDevice(SubDeviceReading),
    EventLog(Vec<PowerFailureEvent>),
    /// Value the decoder recognised but does not model, kept verbatim.
    Unknown(String),
}

/// One decoded frame: field identifiers in wire order with their values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Telegram {
    fields: Vec<(ObisReference, TelegramValue)>,
}

impl Telegram {
    pub fn new(fields: Vec<(ObisReference, TelegramValue)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, reference: ObisReference) -> Option<&TelegramValue> {
        self.fields
            .iter()
            .find(|(r, _)| *r == reference)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl IntoIterator for Telegram {
    type Item = (ObisReference, TelegramValue);
    type IntoIter = std::vec::IntoIter<(ObisReference, TelegramValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
