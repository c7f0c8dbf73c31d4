use anyhow::{anyhow, Result};

use gacha_domain::PageLimit;

pub fn validate_page_limit(value: i64) -> Result<PageLimit> {
    PageLimit::try_from(value).map_err(|err| anyhow!(err))
}

pub fn validate_endpoint(value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("endpoint is empty"));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(anyhow!("endpoint must be an http(s) url"));
    }
    Ok(())
}
