use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::manifest::LocalManifest;
use crate::merge::{merge_builds, MergeSummary};
use crate::upstream::{fetch_build_list, http_client};

/// Inputs for one synchronization run.
#[derive(Debug, Clone)]
pub struct SyncRequest<'a> {
    pub manifest_path: &'a Path,
    pub upstream_url: &'a str,
    pub platform: &'a str,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub manifest_path: PathBuf,
    pub platform: String,
    pub summary: MergeSummary,
}

/// Runs the full pipeline: load the manifest, fetch the upstream list,
/// merge, and persist.
///
/// The write is the final step; nothing reaches disk unless every earlier
/// step succeeds.
///
/// # Errors
/// Returns an error on any I/O, network, or decode failure. No retry is
/// attempted.
pub fn sync_manifest(request: &SyncRequest<'_>) -> Result<SyncReport> {
    let mut manifest = LocalManifest::load(request.manifest_path)?;
    let client = http_client()?;
    let list = fetch_build_list(&client, request.upstream_url)?;
    let summary = merge_builds(&mut manifest, &list, request.platform);
    manifest.save(request.manifest_path)?;

    info!(
        "synchronized {} ({} added, {} replaced)",
        request.manifest_path.display(),
        summary.added,
        summary.replaced
    );

    Ok(SyncReport {
        manifest_path: request.manifest_path.to_path_buf(),
        platform: request.platform.to_string(),
        summary,
    })
}
