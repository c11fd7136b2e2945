use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, Utc};
use rollcall_core::domain::VolunteerId;
use std::str::FromStr;

pub fn now_utc_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn format_timestamp_millis(ms: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp_millis(ms)
        .unwrap_or_default()
        .with_timezone(&Local);
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn parse_volunteer_id(raw: &str) -> Result<VolunteerId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("volunteer id cannot be empty"));
    }
    VolunteerId::from_str(trimmed).map_err(|_| anyhow!("invalid volunteer id"))
}
