/// The single API version this flow supports.
pub const SUPPORTED_API_VERSION: &str = "v1";

/// Device models that can be registered.
#[derive(Copy, Clone, Eq, PartialEq, Debug, strum::EnumString, strum::AsRefStr, strum::Display)]
pub enum ProductType {
    #[strum(serialize = "HWE-P1")]
    P1Meter,
    #[strum(serialize = "HWE-SKT")]
    EnergySocket,
    #[strum(serialize = "SDM230-wifi")]
    Sdm230,
    #[strum(serialize = "SDM630-wifi")]
    Sdm630,
}

/// Raw identity and version metadata exposed by a connected device.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub api_version: String,
    pub product_type: String,
    pub product_name: String,
    pub serial: String,
}

/// A validated probe result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceInfo {
    pub product_name: String,
    pub product_type: ProductType,
    pub serial: String,
}

impl DeviceInfo {
    /// Display title of the record created for this device.
    pub fn title(&self) -> String {
        format!("{} ({})", self.product_name, self.serial)
    }

    pub fn identity_key(&self) -> String {
        identity_key(self.product_type.as_ref(), &self.serial)
    }
}

/// The key used to detect duplicate registrations of the same device.
pub fn identity_key(product_type: &str, serial: &str) -> String {
    format!("{product_type}_{serial}")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_product_type() {
        assert_eq!("HWE-P1".parse::<ProductType>(), Ok(ProductType::P1Meter));
        assert_eq!(ProductType::EnergySocket.to_string(), "HWE-SKT");
        assert!("HWE-WTR".parse::<ProductType>().is_err());
    }

    #[test]
    fn test_identity_key() {
        let info = DeviceInfo {
            product_name: "P1 Meter".to_string(),
            product_type: ProductType::P1Meter,
            serial: "abc123".to_string(),
        };

        assert_eq!(info.identity_key(), "HWE-P1_abc123");
        assert_eq!(info.title(), "P1 Meter (abc123)");
    }
}
