//! data-url command - encode a local file as a base64 data URL

use super::CommandContext;
use crate::utils::format_size;
use anyhow::{Context, Result};
use serde::Serialize;
use tenantry_core::utils::{read_file_as_data_url, DataUrl};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DataUrlResult {
    path: String,
    mime_type: String,
    size: u64,
    data_url: String,
}

pub async fn execute(ctx: &CommandContext, path: &str) -> Result<()> {
    let data_url = read_file_as_data_url(path)
        .await
        .with_context(|| format!("Failed to read {}", path))?;
    let decoded = DataUrl::parse(&data_url)?;
    ctx.debug(&format!(
        "{} encoded as {} ({})",
        path,
        decoded.mime_type,
        format_size(decoded.bytes.len() as u64, true)
    ));

    if ctx.is_json() {
        return ctx.print_json(&DataUrlResult {
            path: path.to_string(),
            mime_type: decoded.mime_type,
            size: decoded.bytes.len() as u64,
            data_url,
        });
    }

    println!("{}", data_url);
    Ok(())
}
