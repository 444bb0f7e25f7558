use std::future::Future;

/// Payload persisted on a configuration record.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecordData {
    #[serde(rename = "ip_address")]
    pub address: String,
}

/// The externally owned configuration record store.
///
/// Uniqueness of an identity key across concurrent flows is the store's own
/// guarantee; a flow instance only consults it.
pub trait RecordStore {
    /// Whether a record is already registered under this identity key.
    fn has_record(&self, identity_key: &str) -> impl Future<Output = bool>;

    /// Refresh the address stored on an existing record.
    fn update_address(&mut self, identity_key: &str, address: &str) -> impl Future<Output = ()>;

    fn create_record(&mut self, title: &str, data: &RecordData) -> impl Future<Output = ()>;
}
