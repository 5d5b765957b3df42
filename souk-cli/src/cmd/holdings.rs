use clap::Args;

use crate::{
    cmd::{Holdings, Opts},
    result::Result,
    serde::print_json,
};

/// Show the active account's bought and sold item indices.
#[derive(Debug, Args)]
pub struct HoldingsCmd {}

impl HoldingsCmd {
    pub async fn run(&self, opts: Opts) -> Result {
        let session = opts.session().await?;
        print_json(&Holdings::from(session.snapshot()))
    }
}
