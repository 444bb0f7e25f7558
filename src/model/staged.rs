use crate::model::ProductType;

/// Context carried from a validated discovery announcement to its
/// confirmation step. Consumed when the confirmation completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedConfig {
    pub address: String,
    pub product_type: ProductType,
    pub product_name: String,
    pub serial: String,
}

impl StagedConfig {
    pub fn title(&self) -> String {
        format!("{} ({})", self.product_name, self.serial)
    }
}
