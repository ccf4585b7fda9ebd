//! DSMR smart meter telegrams and DSMR-reader history into InfluxDB.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
mod test_data;
