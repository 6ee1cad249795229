use std::path::PathBuf;

use clap::{ArgAction, Parser};
use color_eyre::{eyre::eyre, Result};
use serde_json::json;
use solsync_core::{sync_manifest, SyncReport, SyncRequest};
use url::Url;

/// Merge an upstream solc build list into a local artifact manifest.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct SolsyncCli {
    /// Path to the local manifest JSON file, read and rewritten in place
    manifest: PathBuf,
    /// HTTP(S) URL returning the upstream build list
    upstream_url: Url,
    /// Target platform tag, e.g. linux-amd64
    platform: String,
    #[arg(
        short,
        long,
        help = "Suppress human output (errors still print to stderr)"
    )]
    quiet: bool,
    #[arg(short, long, action = ArgAction::Count, help = "Increase logging (-vv reaches trace)")]
    verbose: u8,
    #[arg(long, help = "Emit a {status,message,details} JSON envelope")]
    json: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = SolsyncCli::parse();
    init_tracing(cli.verbose);

    let request = SyncRequest {
        manifest_path: &cli.manifest,
        upstream_url: cli.upstream_url.as_str(),
        platform: &cli.platform,
    };
    let report = sync_manifest(&request).map_err(|err| eyre!("{err:?}"))?;
    emit_output(&cli, &report)?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = format!("solsync_core={level},solsync_cli={level}");
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn emit_output(cli: &SolsyncCli, report: &SyncReport) -> Result<()> {
    if cli.json {
        let payload = json!({
            "status": "ok",
            "message": format!("merged {} upstream builds", report.summary.total),
            "details": {
                "manifest": report.manifest_path,
                "platform": report.platform,
                "total": report.summary.total,
                "added": report.summary.added,
                "replaced": report.summary.replaced,
            },
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if !cli.quiet {
        println!(
            "Merged {} upstream builds into {} ({} added, {} replaced)",
            report.summary.total,
            report.manifest_path.display(),
            report.summary.added,
            report.summary.replaced
        );
    }
    Ok(())
}
