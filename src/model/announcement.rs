use std::collections::HashMap;

pub const PROP_API_ENABLED: &str = "api_enabled";
pub const PROP_PATH: &str = "path";
pub const PROP_PRODUCT_NAME: &str = "product_name";
pub const PROP_PRODUCT_TYPE: &str = "product_type";
pub const PROP_SERIAL: &str = "serial";

/// Properties a usable announcement must carry.
pub const REQUIRED_PROPERTIES: &[&str] = &[
    PROP_API_ENABLED,
    PROP_PATH,
    PROP_PRODUCT_NAME,
    PROP_PRODUCT_TYPE,
    PROP_SERIAL,
];

/// API path a supported device announces.
pub const SUPPORTED_API_PATH: &str = "/api/v1";

/// Value of `api_enabled` when the local API is switched on.
pub const API_ENABLED: &str = "1";

/// A device advertisement as delivered by the network discovery listener.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DiscoveryAnnouncement {
    pub host: String,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, String>,
}

impl DiscoveryAnnouncement {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// The five required properties, or `None` if any of them is missing.
    pub fn required_properties(&self) -> Option<AnnouncedProperties<'_>> {
        Some(AnnouncedProperties {
            api_enabled: self.property(PROP_API_ENABLED)?,
            path: self.property(PROP_PATH)?,
            product_name: self.property(PROP_PRODUCT_NAME)?,
            product_type: self.property(PROP_PRODUCT_TYPE)?,
            serial: self.property(PROP_SERIAL)?,
        })
    }
}

/// Borrowed view of a complete announcement property set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnnouncedProperties<'a> {
    pub api_enabled: &'a str,
    pub path: &'a str,
    pub product_name: &'a str,
    pub product_type: &'a str,
    pub serial: &'a str,
}
