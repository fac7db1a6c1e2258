/// Affine3D Terminal Viewer - interactive wireframe letter
///
/// Controls:
///   - Mouse drag: rotate, Shift+drag: pan, wheel: scale
///   - WASD / Arrow Keys: move in X-Y, PageUp/PageDown: move in Z
///   - Q/E: roll, +/-: scale
///   - Tab: jump animation, R: reset
///   - ESC: quit
///
/// Usage:
///   affine3d-terminal [--config viewer.json] [--mesh letter-k-3d|letter-k|cube] [--seed N]
///
/// Logs go to stderr; set `RUST_LOG` and redirect stderr to keep them.
use std::env;
use std::fs;

use affine3d_core::{LetterParams, MeshKind, ViewerConfig};
use affine3d_terminal::TerminalApp;
use anyhow::Context;
use tracing::info;

fn parse_mesh(name: &str) -> anyhow::Result<MeshKind> {
    match name {
        "letter-k-3d" => Ok(MeshKind::LetterK3d(LetterParams::default())),
        "letter-k" => Ok(MeshKind::LetterK {
            height: 2.0,
            width: 1.6,
        }),
        "cube" => Ok(MeshKind::Cube { size: 2.0 }),
        other => anyhow::bail!("unknown mesh {other:?}"),
    }
}

fn parse_args() -> anyhow::Result<ViewerConfig> {
    let args: Vec<String> = env::args().collect();

    // The config file is the base; flags override it
    let mut cfg = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path = args.get(i + 1).context("--config needs a path")?;
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {path}"))?;
            ViewerConfig::from_json_str(&text)
                .with_context(|| format!("failed to parse config {path}"))?
        }
        None => ViewerConfig::default(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--mesh" if i + 1 < args.len() => {
                cfg.mesh = parse_mesh(&args[i + 1])?;
                i += 2;
            }
            "--seed" if i + 1 < args.len() => {
                cfg.seed = Some(args[i + 1].parse().context("--seed must be an integer")?);
                i += 2;
            }
            _ => i += 1,
        }
    }
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cfg = parse_args()?;
    info!(mesh = ?cfg.mesh, tick_hz = cfg.tick_hz, "starting terminal viewer");

    let mut app = TerminalApp::new(&cfg).context("failed to initialize terminal")?;
    app.run().context("terminal viewer failed")?;

    Ok(())
}
