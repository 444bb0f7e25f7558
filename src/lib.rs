//! Setup flow for registering HomeWizard Energy devices with a
//! home-automation hub.
//!
//! The [`flow::SetupFlow`] drives a short step-based dialogue: probe the
//! device, check it is not registered yet, then hand a configuration record
//! to the embedding layer. Device communication and record persistence are
//! collaborator traits ([`probe::DeviceClient`], [`store::RecordStore`])
//! supplied by the embedder.

pub mod flow;
pub mod model;
pub mod probe;
pub mod store;
