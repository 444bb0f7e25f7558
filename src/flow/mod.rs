mod error;
mod result;

pub use error::*;
pub use result::*;

use crate::model::{
    identity_key, DiscoveryAnnouncement, StagedConfig, API_ENABLED, SUPPORTED_API_PATH,
};
use crate::probe::{fetch_device_info, DeviceClient, ProbeOptions};
use crate::store::{RecordData, RecordStore};

/// Input submitted on the user step.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserInput {
    pub address: String,
}

/// State of a flow instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowState {
    Start,
    AwaitingUserInput,
    AwaitingDiscoveryConfirmation(StagedConfig),
    Completed,
    Aborted(AbortReason),
}

/// One setup attempt, from trigger to created record or abort.
///
/// Driven by the embedding layer: the user path enters through
/// [`Self::step_user`], the discovery path through [`Self::step_discovery`]
/// followed by [`Self::step_discovery_confirm`]. Each step returns the
/// [`FlowResult`] the UI layer should act on.
pub struct SetupFlow<C, S>
where
    C: DeviceClient,
    S: RecordStore,
{
    client: C,
    store: S,
    options: ProbeOptions,
    state: FlowState,
    claimed_key: Option<String>,
}

impl<C, S> SetupFlow<C, S>
where
    C: DeviceClient,
    S: RecordStore,
{
    pub fn new(client: C, store: S) -> Self {
        Self::with_options(client, store, ProbeOptions::default())
    }

    pub fn with_options(client: C, store: S, options: ProbeOptions) -> Self {
        Self {
            client,
            store,
            options,
            state: FlowState::Start,
            claimed_key: None,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle a flow initiated by the user.
    pub async fn step_user(&mut self, input: Option<UserInput>) -> FlowResult {
        log::debug!("setup flow step: user");

        let Some(input) = input else {
            self.state = FlowState::AwaitingUserInput;
            return FlowResult::ShowForm(Form {
                step: StepId::User,
                fields: vec![FormField {
                    name: FIELD_ADDRESS,
                    required: true,
                }],
                title_placeholder: None,
                description_placeholders: Default::default(),
            });
        };

        let device = match fetch_device_info(&self.client, &input.address, &self.options).await {
            Ok(device) => device,
            Err(reason) => return self.abort(reason),
        };

        if let Err(reason) = self
            .check_identity_key(device.product_type.as_ref(), &device.serial, &input.address)
            .await
        {
            return self.abort(reason);
        }

        self.create_entry(device.title(), input.address).await
    }

    /// Handle a flow initiated by a discovery announcement.
    pub async fn step_discovery(&mut self, announcement: DiscoveryAnnouncement) -> FlowResult {
        log::debug!("setup flow step: discovery");

        let Some(props) = announcement.required_properties() else {
            return self.abort(AbortReason::InvalidDiscoveryParameters);
        };

        if props.path != SUPPORTED_API_PATH {
            return self.abort(AbortReason::UnsupportedApiVersion);
        }

        if props.api_enabled != API_ENABLED {
            return self.abort(AbortReason::ApiNotEnabled);
        }

        if let Err(reason) = self
            .check_identity_key(props.product_type, props.serial, &announcement.host)
            .await
        {
            return self.abort(reason);
        }

        let device = match fetch_device_info(&self.client, &announcement.host, &self.options).await
        {
            Ok(device) => device,
            Err(reason) => return self.abort(reason),
        };

        let staged = StagedConfig {
            address: announcement.host,
            product_type: device.product_type,
            product_name: device.product_name,
            serial: device.serial,
        };

        let form = Self::confirm_form(&staged);
        self.state = FlowState::AwaitingDiscoveryConfirmation(staged);
        form
    }

    /// Handle the discovery confirmation step.
    ///
    /// Without confirmation the prompt is re-rendered from the staged data;
    /// may be invoked any number of times. Confirming creates the record and
    /// discards the staged data.
    pub async fn step_discovery_confirm(&mut self, confirmed: bool) -> FlowResult {
        log::debug!("setup flow step: discovery confirm");

        match std::mem::replace(&mut self.state, FlowState::Start) {
            FlowState::AwaitingDiscoveryConfirmation(staged) => {
                if !confirmed {
                    let form = Self::confirm_form(&staged);
                    self.state = FlowState::AwaitingDiscoveryConfirmation(staged);
                    return form;
                }

                self.create_entry(staged.title(), staged.address).await
            }
            state => {
                self.state = state;
                self.abort(AbortReason::UnknownError)
            }
        }
    }

    /// Abort if a record for this identity key exists, refreshing its stored
    /// address as a side effect. Otherwise claim the key for this flow.
    async fn check_identity_key(
        &mut self,
        product_type: &str,
        serial: &str,
        address: &str,
    ) -> Result<(), AbortReason> {
        let key = identity_key(product_type, serial);
        log::debug!("checking identity key {key}");

        if self.store.has_record(&key).await {
            self.store.update_address(&key, address).await;
            return Err(AbortReason::AlreadyConfigured);
        }

        if self.claimed_key.as_deref() == Some(key.as_str()) {
            return Err(AbortReason::AlreadyConfigured);
        }

        self.claimed_key = Some(key);
        Ok(())
    }

    async fn create_entry(&mut self, title: String, address: String) -> FlowResult {
        let data = RecordData { address };
        self.store.create_record(&title, &data).await;
        self.state = FlowState::Completed;

        log::debug!("created record: {title}");

        FlowResult::CreateEntry { title, data }
    }

    fn abort(&mut self, reason: AbortReason) -> FlowResult {
        log::debug!("aborting setup flow: {}", reason.code());

        self.state = FlowState::Aborted(reason);
        FlowResult::Abort(reason)
    }

    fn confirm_form(staged: &StagedConfig) -> FlowResult {
        FlowResult::ShowForm(Form {
            step: StepId::DiscoveryConfirm,
            fields: Vec::new(),
            title_placeholder: Some(staged.title()),
            description_placeholders: [
                ("product_type", staged.product_type.to_string()),
                ("serial", staged.serial.clone()),
                ("address", staged.address.clone()),
            ]
            .into_iter()
            .collect(),
        })
    }
}
