use anyhow::{Context as _, Result};
use rollcall_config::AppConfig;
use rollcall_lookup::ViaCepClient;
use rollcall_store::repo::SessionCheck;
use rollcall_store::Store;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;

pub mod completions;
pub mod lookup;
pub mod session;
pub mod volunteers;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
    pub session: SessionCheck,
}

impl Context<'_> {
    pub fn lookup_client(&self) -> Result<ViaCepClient> {
        let lookup = &self.config.lookup;
        ViaCepClient::new(
            &lookup.base_url,
            Duration::from_secs(lookup.timeout_secs),
            lookup.user_agent.as_deref(),
        )
        .with_context(|| format!("build lookup client for {}", lookup.base_url))
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
