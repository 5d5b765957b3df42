use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use souk_sdk::{
    rpc::RpcClient,
    session::{Session, Snapshot},
    types::Address,
};
use tracing::error;

use crate::{result::Result, settings::Settings};

pub mod holdings;
pub mod item;

/// Common options for commands
#[derive(Debug, Args, Clone)]
pub struct Opts {
    /// Optional settings file. SOUK_-prefixed environment variables override
    /// entries in the file.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Gateway JSON-RPC URL to use. Overrides the settings file.
    #[arg(long, short)]
    url: Option<String>,

    /// Marketplace contract address. Overrides the settings file.
    #[arg(long)]
    contract: Option<Address>,
}

impl Opts {
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::new(self.config.as_ref())?;
        if let Some(url) = &self.url {
            settings.url = url.clone();
        }
        if let Some(contract) = self.contract {
            settings.contract = contract;
        }
        Ok(settings)
    }

    /// Connect a fresh session. Every invocation starts from a clean
    /// snapshot; nothing is carried over between runs.
    pub async fn session(&self) -> Result<Session<RpcClient>> {
        let settings = self.settings()?;
        let client = RpcClient::new(settings.url, settings.contract);
        let session = Session::connect(client).await.map_err(|e| {
            error!("failed to connect to the marketplace: {e}");
            anyhow::Error::from(e)
        })?;
        Ok(session)
    }
}

/// The active account's holdings, as item indices.
#[derive(Debug, Serialize)]
pub struct Holdings {
    pub account: Address,
    pub bought: Vec<u64>,
    pub sold: Vec<u64>,
}

impl From<&Snapshot> for Holdings {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            account: snapshot.account,
            bought: snapshot.bought.clone(),
            sold: snapshot.sold.clone(),
        }
    }
}
