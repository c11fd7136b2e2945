use crate::commands::{print_json, Context};
use crate::util::format_timestamp_millis;
use anyhow::Result;
use clap::Args;
use rollcall_core::dto::SessionStatusDto;

#[derive(Debug, Args)]
pub struct SessionArgs {}

/// Reports the session as it stood when this command started.
pub fn show_session(ctx: &Context<'_>, _args: SessionArgs) -> Result<()> {
    let status = SessionStatusDto {
        state: ctx.session.state.as_str().to_string(),
        last_activity_at: ctx.session.previous_activity_ms,
        timeout_secs: ctx.config.session_timeout_secs,
    };

    if ctx.json {
        return print_json(&status);
    }

    match status.last_activity_at {
        Some(ms) => println!(
            "session {} (last activity {}, timeout {}s)",
            status.state,
            format_timestamp_millis(ms),
            status.timeout_secs
        ),
        None => println!(
            "session {} (no previous activity, timeout {}s)",
            status.state, status.timeout_secs
        ),
    }
    Ok(())
}
