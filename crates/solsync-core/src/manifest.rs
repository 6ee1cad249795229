use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

/// Stored representation of one build's download location and integrity
/// digests. Digests are copied verbatim from upstream, never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub url: Vec<String>,
    pub keccak256: String,
    pub sha256: String,
}

/// The local registry file mapping `<version>-<platform>` keys to artifact
/// records.
///
/// Entry order in `builds` is preserved across a load/save round trip so
/// rewrites stay diff-friendly. Top-level fields other than `builds` are
/// opaque and pass through unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalManifest {
    /// A manifest with no build table starts from an empty one.
    #[serde(default)]
    pub builds: IndexMap<String, ArtifactRecord>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LocalManifest {
    /// Reads and decodes the manifest at `path`.
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable, or not a valid
    /// manifest document.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse manifest {}", path.display()))
    }

    /// Serializes the full manifest and replaces the file at `path`.
    ///
    /// The document is staged in a temp file next to the target and moved
    /// into place with a rename, so a failed write leaves the previous
    /// manifest intact.
    ///
    /// # Errors
    /// Returns an error if the temp file cannot be created, written, or
    /// persisted over `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let rendered = self.render()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        tmp.write_all(rendered.as_bytes())
            .context("failed to write manifest contents")?;
        tmp.write_all(b"\n")
            .context("failed to write manifest contents")?;
        tmp.persist(path)
            .with_context(|| format!("failed to replace manifest {}", path.display()))?;
        Ok(())
    }

    /// Renders the manifest with four-space indentation, matching the
    /// formatting the registry file historically carried.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn render(&self) -> Result<String> {
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)
            .context("failed to serialize manifest")?;
        String::from_utf8(out).context("manifest rendered as non-utf8")
    }
}
