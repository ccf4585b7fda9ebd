// Time-series records handed to the sink
use chrono::{DateTime, Utc};
use std::fmt;

/// Value of a single record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Integer(i64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Float(value) => write!(f, "{}", value),
            FieldValue::Integer(value) => write!(f, "{}i", value),
            FieldValue::Text(value) => write!(f, "{:?}", value),
        }
    }
}

/// A field after its wire identifier has been translated to a stable name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedField {
    pub name: String,
    pub value: FieldValue,
}

impl NamedField {
    pub fn new(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    Telegram,
    GasMeter,
}

impl Measurement {
    pub fn as_str(self) -> &'static str {
        match self {
            Measurement::Telegram => "telegram",
            Measurement::GasMeter => "gas_meter",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable timestamped set of named values.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    measurement: Measurement,
    timestamp: DateTime<Utc>,
    fields: Vec<NamedField>,
}

impl Record {
    pub fn new(measurement: Measurement, timestamp: DateTime<Utc>, fields: Vec<NamedField>) -> Self {
        Self {
            measurement,
            timestamp,
            fields,
        }
    }

    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn fields(&self) -> &[NamedField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }
}
