use crate::flow::AbortReason;
use crate::store::RecordData;
use std::collections::BTreeMap;

/// Form field requested on the user step.
pub const FIELD_ADDRESS: &str = "address";

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::AsRefStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StepId {
    User,
    DiscoveryConfirm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub required: bool,
}

/// A form for the UI layer to render before the flow can proceed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Form {
    pub step: StepId,
    pub fields: Vec<FormField>,
    /// Placeholder for the flow title while awaiting confirmation.
    pub title_placeholder: Option<String>,
    pub description_placeholders: BTreeMap<&'static str, String>,
}

/// Outcome of one flow step, surfaced to the UI layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowResult {
    ShowForm(Form),
    CreateEntry { title: String, data: RecordData },
    Abort(AbortReason),
}
