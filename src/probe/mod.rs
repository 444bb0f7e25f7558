mod options;

pub use options::*;

use crate::flow::AbortReason;
use crate::model::{DeviceDescriptor, DeviceInfo, ProductType, SUPPORTED_API_VERSION};
use std::future::Future;

/// Failure while connecting to a device or fetching its descriptor.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// The device refused because its local API is switched off.
    #[error("device API is disabled")]
    ApiDisabled,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// The external device communication client.
pub trait DeviceClient {
    type Connection: DeviceConnection;

    fn connect(&self, address: &str) -> Self::Connection;
}

/// One connection to a device. Closed exactly once, success or failure.
pub trait DeviceConnection {
    /// Fetch the device descriptor.
    fn initialize(&mut self) -> impl Future<Output = Result<(), ConnectError>>;

    /// The descriptor fetched by [`Self::initialize`], if any.
    fn descriptor(&self) -> Option<&DeviceDescriptor>;

    fn close(self) -> impl Future<Output = ()>;
}

/// Connect to the device at `address` and fetch its identity metadata.
///
/// The connection attempt is bounded by the configured timeout and the
/// connection is closed afterwards regardless of outcome. Failures map to
/// the fixed abort reasons; diagnostic detail only goes to the log.
pub async fn fetch_device_info<C: DeviceClient>(
    client: &C,
    address: &str,
    options: &ProbeOptions,
) -> Result<DeviceInfo, AbortReason> {
    log::debug!("probing device at {address}");

    let mut connection = client.connect(address);

    let outcome = tokio::time::timeout(options.timeout, connection.initialize()).await;
    let descriptor = connection.descriptor().cloned();
    connection.close().await;

    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(ConnectError::ApiDisabled)) => {
            log::error!("API disabled, API must be enabled in the app");
            return Err(AbortReason::ApiNotEnabled);
        }
        Ok(Err(err)) => {
            log::error!("Error connecting with energy device at {address}: {err}");
            return Err(AbortReason::UnknownError);
        }
        Err(_) => {
            log::error!("Timed out connecting with energy device at {address}");
            return Err(AbortReason::UnknownError);
        }
    }

    let Some(descriptor) = descriptor else {
        log::error!("Initialization failed");
        return Err(AbortReason::UnknownError);
    };

    if descriptor.api_version != SUPPORTED_API_VERSION {
        return Err(AbortReason::UnsupportedApiVersion);
    }

    let Ok(product_type) = descriptor.product_type.parse::<ProductType>() else {
        log::error!("Device ({}) not supported", descriptor.product_type);
        return Err(AbortReason::DeviceNotSupported);
    };

    Ok(DeviceInfo {
        product_name: descriptor.product_name,
        product_type,
        serial: descriptor.serial,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// What a [`FakeClient`] connection does on initialize.
    #[derive(Clone)]
    pub(crate) enum Response {
        Descriptor(DeviceDescriptor),
        ApiDisabled,
        Failure,
        NoDescriptor,
        Hang,
    }

    pub(crate) struct FakeClient {
        response: Response,
        closed: Arc<AtomicUsize>,
    }

    impl FakeClient {
        pub(crate) fn new(response: Response) -> Self {
            Self {
                response,
                closed: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub(crate) fn closed(&self) -> usize {
            self.closed.load(Ordering::SeqCst)
        }

        /// Descriptor matching the worked P1 meter example.
        pub(crate) fn p1_descriptor() -> DeviceDescriptor {
            DeviceDescriptor {
                api_version: "v1".to_string(),
                product_type: "HWE-P1".to_string(),
                product_name: "P1 Meter".to_string(),
                serial: "abc123".to_string(),
            }
        }
    }

    impl DeviceClient for FakeClient {
        type Connection = FakeConnection;

        fn connect(&self, _address: &str) -> FakeConnection {
            FakeConnection {
                response: self.response.clone(),
                descriptor: None,
                closed: self.closed.clone(),
            }
        }
    }

    pub(crate) struct FakeConnection {
        response: Response,
        descriptor: Option<DeviceDescriptor>,
        closed: Arc<AtomicUsize>,
    }

    impl DeviceConnection for FakeConnection {
        async fn initialize(&mut self) -> Result<(), ConnectError> {
            match &self.response {
                Response::Descriptor(descriptor) => {
                    self.descriptor = Some(descriptor.clone());
                    Ok(())
                }
                Response::ApiDisabled => Err(ConnectError::ApiDisabled),
                Response::Failure => Err(ConnectError::Other(Box::new(std::io::Error::from(
                    std::io::ErrorKind::ConnectionRefused,
                )))),
                Response::NoDescriptor => Ok(()),
                Response::Hang => std::future::pending().await,
            }
        }

        fn descriptor(&self) -> Option<&DeviceDescriptor> {
            self.descriptor.as_ref()
        }

        async fn close(self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod test {
    use super::testing::*;
    use super::*;

    async fn probe(client: &FakeClient) -> Result<DeviceInfo, AbortReason> {
        fetch_device_info(client, "10.0.0.5", &ProbeOptions::default()).await
    }

    #[tokio::test]
    async fn test_success() {
        let client = FakeClient::new(Response::Descriptor(FakeClient::p1_descriptor()));

        let info = probe(&client).await.unwrap();
        assert_eq!(info.product_name, "P1 Meter");
        assert_eq!(info.product_type, ProductType::P1Meter);
        assert_eq!(info.serial, "abc123");
        assert_eq!(client.closed(), 1);
    }

    #[tokio::test]
    async fn test_api_disabled() {
        let client = FakeClient::new(Response::ApiDisabled);

        assert_eq!(probe(&client).await, Err(AbortReason::ApiNotEnabled));
        assert_eq!(client.closed(), 1);
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let client = FakeClient::new(Response::Failure);

        assert_eq!(probe(&client).await, Err(AbortReason::UnknownError));
        assert_eq!(client.closed(), 1);
    }

    #[tokio::test]
    async fn test_no_descriptor() {
        let client = FakeClient::new(Response::NoDescriptor);

        assert_eq!(probe(&client).await, Err(AbortReason::UnknownError));
        assert_eq!(client.closed(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let client = FakeClient::new(Response::Hang);

        assert_eq!(probe(&client).await, Err(AbortReason::UnknownError));
        assert_eq!(client.closed(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_api_version() {
        let client = FakeClient::new(Response::Descriptor(DeviceDescriptor {
            api_version: "v2".to_string(),
            ..FakeClient::p1_descriptor()
        }));

        assert_eq!(probe(&client).await, Err(AbortReason::UnsupportedApiVersion));
    }

    #[tokio::test]
    async fn test_unsupported_device() {
        let client = FakeClient::new(Response::Descriptor(DeviceDescriptor {
            product_type: "HWE-WTR".to_string(),
            ..FakeClient::p1_descriptor()
        }));

        assert_eq!(probe(&client).await, Err(AbortReason::DeviceNotSupported));
    }
}
