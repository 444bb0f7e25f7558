/// The fixed set of reasons a setup flow can abort with.
///
/// The snake_case code is what the UI layer renders; diagnostic detail never
/// travels with it.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, thiserror::Error, strum::AsRefStr, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum AbortReason {
    #[error("discovery announcement is missing required properties")]
    InvalidDiscoveryParameters,
    #[error("device API version is not supported")]
    UnsupportedApiVersion,
    #[error("device API is not enabled")]
    ApiNotEnabled,
    #[error("unexpected error while contacting the device")]
    UnknownError,
    #[error("device model is not supported")]
    DeviceNotSupported,
    #[error("device is already configured")]
    AlreadyConfigured,
}

impl AbortReason {
    /// The stable reason code surfaced to the UI layer.
    pub fn code(&self) -> &'static str {
        (*self).into()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            AbortReason::InvalidDiscoveryParameters.code(),
            "invalid_discovery_parameters"
        );
        assert_eq!(
            AbortReason::UnsupportedApiVersion.code(),
            "unsupported_api_version"
        );
        assert_eq!(AbortReason::ApiNotEnabled.code(), "api_not_enabled");
        assert_eq!(AbortReason::UnknownError.code(), "unknown_error");
        assert_eq!(AbortReason::DeviceNotSupported.code(), "device_not_supported");
        assert_eq!(AbortReason::AlreadyConfigured.code(), "already_configured");
    }
}
