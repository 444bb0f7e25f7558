//! Run the setup flow against a canned in-process device

use clap::Parser;
use hwenergy_setup::flow::{FlowResult, SetupFlow, UserInput};
use hwenergy_setup::model::DeviceDescriptor;
use hwenergy_setup::probe::{ConnectError, DeviceClient, DeviceConnection, ProbeOptions};
use hwenergy_setup::store::{RecordData, RecordStore};
use std::collections::HashMap;

#[derive(Debug, clap::Parser)]
struct Cli {
    /// Address to hand to the flow
    address: String,

    #[command(flatten)]
    probe: ProbeOptions,
}

/// A device client that answers every probe with the same descriptor.
struct CannedDevice {
    descriptor: DeviceDescriptor,
}

impl DeviceClient for CannedDevice {
    type Connection = CannedConnection;

    fn connect(&self, address: &str) -> CannedConnection {
        log::info!("connecting to {address}");
        CannedConnection {
            descriptor: self.descriptor.clone(),
        }
    }
}

struct CannedConnection {
    descriptor: DeviceDescriptor,
}

impl DeviceConnection for CannedConnection {
    async fn initialize(&mut self) -> Result<(), ConnectError> {
        Ok(())
    }

    fn descriptor(&self) -> Option<&DeviceDescriptor> {
        Some(&self.descriptor)
    }

    async fn close(self) {
        log::info!("connection closed");
    }
}

#[derive(Default)]
struct MemoryStore {
    records: HashMap<String, RecordData>,
}

impl RecordStore for MemoryStore {
    async fn has_record(&self, identity_key: &str) -> bool {
        self.records.contains_key(identity_key)
    }

    async fn update_address(&mut self, identity_key: &str, address: &str) {
        if let Some(record) = self.records.get_mut(identity_key) {
            record.address = address.to_string();
        }
    }

    async fn create_record(&mut self, title: &str, data: &RecordData) {
        log::info!("registered '{title}' at {}", data.address);
        self.records.insert(title.to_string(), data.clone());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let device = CannedDevice {
        descriptor: DeviceDescriptor {
            api_version: "v1".to_string(),
            product_type: "HWE-P1".to_string(),
            product_name: "P1 Meter".to_string(),
            serial: "3c39e7aabbcc".to_string(),
        },
    };

    let mut flow = SetupFlow::with_options(device, MemoryStore::default(), cli.probe);

    match flow.step_user(Some(UserInput {
        address: cli.address,
    })).await
    {
        FlowResult::CreateEntry { title, data } => {
            log::info!("created entry '{title}' with address {}", data.address);
        }
        FlowResult::ShowForm(form) => {
            log::warn!("unexpected form for step {}", form.step);
        }
        FlowResult::Abort(reason) => {
            log::error!("setup aborted: {}", reason.code());
        }
    }

    Ok(())
}
