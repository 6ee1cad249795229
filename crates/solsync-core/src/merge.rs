use serde::Serialize;
use tracing::debug;

use crate::manifest::{ArtifactRecord, LocalManifest};
use crate::upstream::UpstreamBuildList;

/// Canonical location of published solc binaries, extended with
/// `/{platform}/{path}` per artifact.
pub const DOWNLOAD_URL_BASE: &str = "https://github.com/ethereum/solc-bin/raw/gh-pages";

/// Per-run merge counts. `replaced` covers every key that already existed,
/// including rewrites that did not change the record.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MergeSummary {
    pub total: usize,
    pub added: usize,
    pub replaced: usize,
}

/// The unique key under which an artifact record is stored.
#[must_use]
pub fn composite_key(version: &str, platform: &str) -> String {
    format!("{version}-{platform}")
}

/// Fully qualified download URL for an upstream artifact path.
#[must_use]
pub fn artifact_url(platform: &str, path: &str) -> String {
    format!("{DOWNLOAD_URL_BASE}/{platform}/{path}")
}

/// Merges every upstream descriptor into the manifest's build table, in
/// upstream order.
///
/// Inserts are unconditional: an existing entry under the same key is
/// overwritten, so duplicate versions in the upstream list resolve
/// last-write-wins. No other manifest field is touched.
pub fn merge_builds(
    manifest: &mut LocalManifest,
    list: &UpstreamBuildList,
    platform: &str,
) -> MergeSummary {
    let mut summary = MergeSummary {
        total: list.builds.len(),
        ..MergeSummary::default()
    };

    for build in &list.builds {
        let key = composite_key(&build.version, platform);
        let record = ArtifactRecord {
            url: vec![artifact_url(platform, &build.path)],
            keccak256: build.keccak256.clone(),
            sha256: build.sha256.clone(),
        };
        debug!("merging {key}");
        if manifest.builds.insert(key, record).is_some() {
            summary.replaced += 1;
        } else {
            summary.added += 1;
        }
    }

    summary
}
