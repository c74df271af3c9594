//! Serve command handler
//!
//! Start the dashboard web server.

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Result;

use super::CommandContext;
use crate::web;

/// Handle the `serve` command
pub async fn run_serve(
    ctx: &CommandContext,
    port: Option<u16>,
    bind: Option<IpAddr>,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    let mut settings = ctx.settings.clone();
    if let Some(port) = port {
        settings.addr.set_port(port);
    }
    if let Some(bind) = bind {
        settings.addr.set_ip(bind);
    }
    if static_dir.is_some() {
        settings.static_dir = static_dir;
    }

    web::serve(settings).await
}
