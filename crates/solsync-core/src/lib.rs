//! Core logic for `solsync`: load a local solc artifact manifest, fetch the
//! upstream build list, merge, and write the manifest back.

mod manifest;
mod merge;
mod sync;
mod upstream;

pub use manifest::{ArtifactRecord, LocalManifest};
pub use merge::{artifact_url, composite_key, merge_builds, MergeSummary, DOWNLOAD_URL_BASE};
pub use sync::{sync_manifest, SyncReport, SyncRequest};
pub use upstream::{
    fetch_build_list, http_client, parse_build_list, UpstreamBuildDescriptor, UpstreamBuildList,
};
