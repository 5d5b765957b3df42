use clap::{Args, Subcommand};
use serde::Serialize;
use souk_sdk::prelude::*;
use tracing::error;

use crate::{
    cmd::{Holdings, Opts},
    result::Result,
    serde::print_json,
};

#[derive(Debug, Args)]
pub struct ItemCmd {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Show every listing the contract reports, in contract order
    List,
    /// Register a new listing for sale from the active account
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        image_url: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        price: u64,
    },
    /// Buy a listing, paying with the contract's own token
    Buy {
        /// Index of the listing in the gallery
        index: u64,
    },
}

impl ItemCmd {
    pub async fn run(&self, opts: Opts) -> Result {
        match &self.cmd {
            Cmd::List => {
                let session = opts.session().await?;
                let rows = session
                    .snapshot()
                    .items
                    .iter()
                    .cloned()
                    .enumerate()
                    .map(|(index, item)| Row {
                        index: index as u64,
                        item,
                    })
                    .collect::<Vec<_>>();
                print_json(&rows)
            }
            Cmd::Add {
                name,
                image_url,
                description,
                location,
                price,
            } => {
                let mut session = opts.session().await?;
                // Form fields go to the contract verbatim; only the price is
                // numeric by construction of the flag.
                let draft = ItemDraft {
                    name: name.clone(),
                    image_url: image_url.clone(),
                    description: description.clone(),
                    location: location.clone(),
                    price: *price,
                };
                let added = session.add_item(&draft).await.map_err(|e| {
                    error!("failed to add item: {e}");
                    anyhow::Error::from(e)
                })?;
                let index = session.snapshot().items.len() as u64 - 1;
                print_json(&Row { index, item: added })
            }
            Cmd::Buy { index } => {
                let mut session = opts.session().await?;
                match session.buy_item(*index).await {
                    Ok(()) => print_json(&Holdings::from(session.snapshot())),
                    Err(Error::Provider(ProviderError::Reverted { reason })) => {
                        error!("transaction reverted: {reason}");
                        Err(anyhow::anyhow!("transaction reverted: {reason}"))
                    }
                    Err(e) => {
                        error!("failed to buy item: {e}");
                        Err(anyhow::Error::from(e))
                    }
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct Row {
    pub index: u64,
    #[serde(flatten)]
    pub item: Item,
}
