// OBIS references and their stable field names
use std::fmt;

/// Closed set of OBIS references known to the supported DSMR telegram
/// specifications. Sub-device references (`0-n:..`) match any channel `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObisReference {
    P1MessageHeader,
    P1MessageTimestamp,
    EquipmentIdentifier,
    ElectricityUsedTariff1,
    ElectricityUsedTariff2,
    ElectricityDeliveredTariff1,
    ElectricityDeliveredTariff2,
    ElectricityActiveTariff,
    CurrentElectricityUsage,
    CurrentElectricityDelivery,
    ActualThresholdElectricity,
    ActualSwitchPosition,
    ShortPowerFailureCount,
    LongPowerFailureCount,
    PowerEventFailureLog,
    VoltageSagL1Count,
    VoltageSagL2Count,
    VoltageSagL3Count,
    VoltageSwellL1Count,
    VoltageSwellL2Count,
    VoltageSwellL3Count,
    TextMessageCode,
    TextMessage,
    InstantaneousVoltageL1,
    InstantaneousVoltageL2,
    InstantaneousVoltageL3,
    InstantaneousCurrentL1,
    InstantaneousCurrentL2,
    InstantaneousCurrentL3,
    InstantaneousActivePowerL1Positive,
    InstantaneousActivePowerL2Positive,
    InstantaneousActivePowerL3Positive,
    InstantaneousActivePowerL1Negative,
    InstantaneousActivePowerL2Negative,
    InstantaneousActivePowerL3Negative,
    DeviceType,
    EquipmentIdentifierGas,
    HourlyGasMeterReading,
    GasMeterReading,
    ValvePositionGas,
}

impl ObisReference {
    /// Resolve a wire code such as `1-0:1.8.1` or `0-2:24.2.1`.
    pub fn from_code(code: &str) -> Option<Self> {
        use ObisReference::*;

        let reference = match code {
            "1-3:0.2.8" => P1MessageHeader,
            "0-0:1.0.0" => P1MessageTimestamp,
            "0-0:96.1.1" => EquipmentIdentifier,
            "1-0:1.8.1" => ElectricityUsedTariff1,
            "1-0:1.8.2" => ElectricityUsedTariff2,
            "1-0:2.8.1" => ElectricityDeliveredTariff1,
            "1-0:2.8.2" => ElectricityDeliveredTariff2,
            "0-0:96.14.0" => ElectricityActiveTariff,
            "1-0:1.7.0" => CurrentElectricityUsage,
            "1-0:2.7.0" => CurrentElectricityDelivery,
            "0-0:17.0.0" => ActualThresholdElectricity,
            "0-0:96.3.10" => ActualSwitchPosition,
            "0-0:96.7.21" => ShortPowerFailureCount,
            "0-0:96.7.9" => LongPowerFailureCount,
            "1-0:99.97.0" => PowerEventFailureLog,
            "1-0:32.32.0" => VoltageSagL1Count,
            "1-0:52.32.0" => VoltageSagL2Count,
            "1-0:72.32.0" => VoltageSagL3Count,
            "1-0:32.36.0" => VoltageSwellL1Count,
            "1-0:52.36.0" => VoltageSwellL2Count,
            "1-0:72.36.0" => VoltageSwellL3Count,
            "0-0:96.13.1" => TextMessageCode,
            "0-0:96.13.0" => TextMessage,
            "1-0:32.7.0" => InstantaneousVoltageL1,
            "1-0:52.7.0" => InstantaneousVoltageL2,
            "1-0:72.7.0" => InstantaneousVoltageL3,
            "1-0:31.7.0" => InstantaneousCurrentL1,
            "1-0:51.7.0" => InstantaneousCurrentL2,
            "1-0:71.7.0" => InstantaneousCurrentL3,
            "1-0:21.7.0" => InstantaneousActivePowerL1Positive,
            "1-0:41.7.0" => InstantaneousActivePowerL2Positive,
            "1-0:61.7.0" => InstantaneousActivePowerL3Positive,
            "1-0:22.7.0" => InstantaneousActivePowerL1Negative,
            "1-0:42.7.0" => InstantaneousActivePowerL2Negative,
            "1-0:62.7.0" => InstantaneousActivePowerL3Negative,
            _ => return Self::from_channel_code(code),
        };

        Some(reference)
    }

    fn from_channel_code(code: &str) -> Option<Self> {
        use ObisReference::*;

        // "0-n:" where n is a single M-Bus channel digit
        let rest = code.strip_prefix("0-")?;
        let mut chars = rest.chars();
        if !chars.next()?.is_ascii_digit() || chars.next()? != ':' {
            return None;
        }

        match chars.as_str() {
            "24.1.0" => Some(DeviceType),
            "96.1.0" => Some(EquipmentIdentifierGas),
            "24.2.1" => Some(HourlyGasMeterReading),
            "24.3.0" => Some(GasMeterReading),
            "24.4.0" => Some(ValvePositionGas),
            _ => None,
        }
    }

    /// Stable, lower-cased field name used in stored records.
    pub fn name(self) -> &'static str {
        use ObisReference::*;

        match self {
            P1MessageHeader => "p1_message_header",
            P1MessageTimestamp => "p1_message_timestamp",
            EquipmentIdentifier => "equipment_identifier",
            ElectricityUsedTariff1 => "electricity_used_tariff_1",
            ElectricityUsedTariff2 => "electricity_used_tariff_2",
            ElectricityDeliveredTariff1 => "electricity_delivered_tariff_1",
            ElectricityDeliveredTariff2 => "electricity_delivered_tariff_2",
            ElectricityActiveTariff => "electricity_active_tariff",
            CurrentElectricityUsage => "current_electricity_usage",
            CurrentElectricityDelivery => "current_electricity_delivery",
            // Spelling matches series already written by earlier collectors
            ActualThresholdElectricity => "actual_treshold_electricity",
            ActualSwitchPosition => "actual_switch_position",
            ShortPowerFailureCount => "short_power_failure_count",
            LongPowerFailureCount => "long_power_failure_count",
            PowerEventFailureLog => "power_event_failure_log",
            VoltageSagL1Count => "voltage_sag_l1_count",
            VoltageSagL2Count => "voltage_sag_l2_count",
            VoltageSagL3Count => "voltage_sag_l3_count",
            VoltageSwellL1Count => "voltage_swell_l1_count",
            VoltageSwellL2Count => "voltage_swell_l2_count",
            VoltageSwellL3Count => "voltage_swell_l3_count",
            TextMessageCode => "text_message_code",
            TextMessage => "text_message",
            InstantaneousVoltageL1 => "instantaneous_voltage_l1",
            InstantaneousVoltageL2 => "instantaneous_voltage_l2",
            InstantaneousVoltageL3 => "instantaneous_voltage_l3",
            InstantaneousCurrentL1 => "instantaneous_current_l1",
            InstantaneousCurrentL2 => "instantaneous_current_l2",
            InstantaneousCurrentL3 => "instantaneous_current_l3",
            InstantaneousActivePowerL1Positive => "instantaneous_active_power_l1_positive",
            InstantaneousActivePowerL2Positive => "instantaneous_active_power_l2_positive",
            InstantaneousActivePowerL3Positive => "instantaneous_active_power_l3_positive",
            InstantaneousActivePowerL1Negative => "instantaneous_active_power_l1_negative",
            InstantaneousActivePowerL2Negative => "instantaneous_active_power_l2_negative",
            InstantaneousActivePowerL3Negative => "instantaneous_active_power_l3_negative",
            DeviceType => "device_type",
            EquipmentIdentifierGas => "equipment_identifier_gas",
            HourlyGasMeterReading => "hourly_gas_meter_reading",
            GasMeterReading => "gas_meter_reading",
            ValvePositionGas => "valve_position_gas",
        }
    }
}

impl fmt::Display for ObisReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(
            ObisReference::from_code("1-0:1.7.0"),
            Some(ObisReference::CurrentElectricityUsage)
        );
        assert_eq!(
            ObisReference::from_code("0-0:96.7.21"),
            Some(ObisReference::ShortPowerFailureCount)
        );
        assert_eq!(ObisReference::from_code("1-0:99.99.9"), None);
        assert_eq!(ObisReference::from_code(""), None);
    }

    #[test]
    fn test_from_code_any_channel() {
        assert_eq!(
            ObisReference::from_code("0-1:24.2.1"),
            Some(ObisReference::HourlyGasMeterReading)
        );
        assert_eq!(
            ObisReference::from_code("0-2:24.2.1"),
            Some(ObisReference::HourlyGasMeterReading)
        );
        assert_eq!(ObisReference::from_code("0-x:24.2.1"), None);
        assert_eq!(ObisReference::from_code("0-12:24.2.1"), None);
    }

    #[test]
    fn test_names_are_lower_case() {
        let references = [
            ObisReference::P1MessageHeader,
            ObisReference::CurrentElectricityUsage,
            ObisReference::InstantaneousActivePowerL3Negative,
            ObisReference::GasMeterReading,
        ];

        for reference in references {
            assert_eq!(reference.name(), reference.name().to_lowercase());
        }
        assert_eq!(
            ObisReference::HourlyGasMeterReading.to_string(),
            "hourly_gas_meter_reading"
        );
    }
}
