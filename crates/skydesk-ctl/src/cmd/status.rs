//! status and health commands.

use anyhow::Result;
use serde::Deserialize;

use super::http::{endpoint, get_text, parse};
use super::{Ctx, print_raw};

#[derive(Deserialize)]
struct RootResponse {
    service: String,
    version: String,
    active_devices: usize,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

pub async fn cmd_status(ctx: &Ctx) -> Result<()> {
    let text = get_text(endpoint(&ctx.base, &[])?).await?;

    if ctx.json {
        print_raw(&text);
        return Ok(());
    }
    let resp: RootResponse = parse(&text)?;
    println!("═══════════════════════════════════════");
    println!("  {} v{}", resp.service, resp.version);
    println!("═══════════════════════════════════════");
    println!("  Server         : {}", ctx.base);
    println!("  Active devices : {}", resp.active_devices);
    Ok(())
}

pub async fn cmd_health(ctx: &Ctx) -> Result<()> {
    let text = get_text(endpoint(&ctx.base, &["health"])?).await?;

    if ctx.json {
        print_raw(&text);
        return Ok(());
    }
    let resp: HealthResponse = parse(&text)?;
    println!("{}: {}", ctx.base, resp.status);
    Ok(())
}
