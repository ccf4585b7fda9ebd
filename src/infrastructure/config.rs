use crate::infrastructure::p1_decoder::TelegramSpecification;
use crate::infrastructure::serial_transport::SerialProfile;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct InfluxSettings {
    pub url: String,
    pub org: String,
    pub token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DsmrSettings {
    #[serde(default = "default_device")]
    pub device: String,
    #[serde(default = "default_serial_settings")]
    pub serial_settings: SerialProfile,
    #[serde(default = "default_telegram_specification")]
    pub telegram_specification: TelegramSpecification,
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

fn default_device() -> String {
    "/dev/ttyUSB0".to_string()
}

fn default_serial_settings() -> SerialProfile {
    SerialProfile::V5
}

fn default_telegram_specification() -> TelegramSpecification {
    TelegramSpecification::V5
}

fn default_bucket() -> String {
    "dsmr".to_string()
}

/// `config/influx.toml` if present, overridden by `INFLUXDB_V2_*`.
pub fn load_influx_config() -> anyhow::Result<InfluxSettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/influx").required(false))
        .add_source(config::Environment::with_prefix("INFLUXDB_V2"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// `config/dsmr.toml` if present, overridden by `DSMR_*`.
pub fn load_dsmr_config() -> anyhow::Result<DsmrSettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dsmr").required(false))
        .add_source(config::Environment::with_prefix("DSMR"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dsmr_settings(source: config::Environment) -> DsmrSettings {
        config::Config::builder()
            .add_source(source)
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_dsmr_defaults() {
        let settings = dsmr_settings(
            config::Environment::with_prefix("DSMR").source(Some(Default::default())),
        );

        assert_eq!(settings.device, "/dev/ttyUSB0");
        assert_eq!(settings.serial_settings, SerialProfile::V5);
        assert_eq!(settings.telegram_specification, TelegramSpecification::V5);
        assert_eq!(settings.bucket, "dsmr");
    }

    #[test]
    fn test_dsmr_from_environment() {
        let env = [
            ("DSMR_DEVICE", "/dev/ttyAMA0"),
            ("DSMR_SERIAL_SETTINGS", "V2_2"),
            ("DSMR_TELEGRAM_SPECIFICATION", "V3"),
            ("DSMR_BUCKET", "energy"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let settings = dsmr_settings(config::Environment::with_prefix("DSMR").source(Some(env)));

        assert_eq!(settings.device, "/dev/ttyAMA0");
        assert_eq!(settings.serial_settings, SerialProfile::V22);
        assert_eq!(settings.telegram_specification, TelegramSpecification::V3);
        assert_eq!(settings.bucket, "energy");
    }

    #[test]
    fn test_influx_from_environment() {
        let env = [
            ("INFLUXDB_V2_URL", "http://localhost:8086"),
            ("INFLUXDB_V2_ORG", "home"),
            ("INFLUXDB_V2_TOKEN", "secret"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let settings: InfluxSettings = config::Config::builder()
            .add_source(config::Environment::with_prefix("INFLUXDB_V2").source(Some(env)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.url, "http://localhost:8086");
        assert_eq!(settings.org, "home");
        assert_eq!(settings.token, "secret");
    }
}
