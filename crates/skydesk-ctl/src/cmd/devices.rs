//! register, lookup, devices commands.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::http::{endpoint, get_text, parse, post_text};
use super::{Ctx, print_raw};

// ── Request / response types ──────────────────────────────────────────────────

#[derive(Serialize)]
struct RegisterRequest<'a> {
    ip: &'a str,
}

#[derive(Deserialize)]
struct RegisterResponse {
    status: String,
    device_id: String,
    ip: String,
}

#[derive(Deserialize)]
struct LookupResponse {
    status: String,
    device_id: String,
    ip: String,
    last_seen: u64,
}

#[derive(Deserialize)]
pub struct DevicesResponse {
    pub total: usize,
    pub devices: Vec<DeviceInfo>,
}

#[derive(Deserialize)]
pub struct DeviceInfo {
    pub id: String,
    pub ip: String,
    pub last_seen: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ── Commands ──────────────────────────────────────────────────────────────────

pub async fn cmd_register(ctx: &Ctx, device_id: &str, ip: &str) -> Result<()> {
    let url = endpoint(&ctx.base, &["register", device_id])?;
    let text = post_text(url, &RegisterRequest { ip }).await?;

    if ctx.json {
        print_raw(&text);
        return Ok(());
    }
    let resp: RegisterResponse = parse(&text)?;
    println!("Registered {} → {}", resp.device_id, resp.ip);
    Ok(())
}

pub async fn cmd_lookup(ctx: &Ctx, device_id: &str) -> Result<()> {
    let url = endpoint(&ctx.base, &["lookup", device_id])?;
    let text = get_text(url).await?;

    if ctx.json {
        print_raw(&text);
        return Ok(());
    }
    let resp: LookupResponse = parse(&text)?;
    println!("  ┌─ {}", resp.device_id);
    println!("  │  ip        : {}", resp.ip);
    println!(
        "  └─ last seen : {}s ago",
        now_secs().saturating_sub(resp.last_seen)
    );
    Ok(())
}

pub async fn cmd_devices(ctx: &Ctx) -> Result<()> {
    let text = get_text(endpoint(&ctx.base, &["devices"])?).await?;

    if ctx.json {
        print_raw(&text);
        return Ok(());
    }
    let resp: DevicesResponse = parse(&text)?;
    print!("{}", render_devices(&resp, now_secs()));
    Ok(())
}

/// Format the device table, newest registration first.
pub fn render_devices(resp: &DevicesResponse, now: u64) -> String {
    if resp.devices.is_empty() {
        return "No devices registered.\n".to_string();
    }

    let mut devices: Vec<&DeviceInfo> = resp.devices.iter().collect();
    devices.sort_by(|a, b| b.last_seen.cmp(&a.last_seen).then_with(|| a.id.cmp(&b.id)));

    // `{:<w$}` pads by char count, so widths are measured the same way.
    let id_width = devices.iter().map(|d| d.id.chars().count()).max().unwrap_or(0).max(2);
    let ip_width = devices.iter().map(|d| d.ip.chars().count()).max().unwrap_or(0).max(2);

    let mut out = String::new();
    out.push_str("═══════════════════════════════════════\n");
    out.push_str(&format!("  Registered Devices ({})\n", resp.total));
    out.push_str("═══════════════════════════════════════\n");
    out.push_str(&format!(
        "  {:<id_width$}  {:<ip_width$}  LAST SEEN\n",
        "ID", "IP"
    ));
    for d in devices {
        out.push_str(&format!(
            "  {:<id_width$}  {:<ip_width$}  {}s ago\n",
            d.id,
            d.ip,
            now.saturating_sub(d.last_seen)
        ));
    }
    out
}
