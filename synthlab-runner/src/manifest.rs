//! Run manifest export (JSON).
//!
//! The manifest ties the three output files to the seed and config hash
//! that produced them. It carries no wall-clock time, so a rerun with the
//! same config produces a byte-identical manifest.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Spot,
    Futures,
    Options,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDigest {
    pub kind: TableKind,
    pub path: PathBuf,
    /// Data rows, excluding the header.
    pub rows: usize,
    pub blake3: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub seed: u64,
    pub config_hash: String,
    pub timestamp_count: usize,
    pub files: Vec<FileDigest>,
}

impl RunManifest {
    pub fn file(&self, kind: TableKind) -> Option<&FileDigest> {
        self.files.iter().find(|f| f.kind == kind)
    }
}

/// BLAKE3 digest of a file's contents, hex encoded.
pub fn digest_file(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

pub fn write_manifest(path: &Path, manifest: &RunManifest) -> Result<()> {
    let json =
        serde_json::to_string_pretty(manifest).context("Failed to serialize run manifest")?;
    crate::export::write_to_path(path, |mut w| {
        use std::io::Write;
        w.write_all(json.as_bytes())?;
        w.write_all(b"\n")?;
        w.flush()?;
        Ok(())
    })
}

pub fn read_manifest(path: &Path) -> Result<RunManifest> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    serde_json::from_str(&json).context("failed to parse run manifest")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_changes_with_content() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        std::fs::write(&a, "x,y\n1,2\n").unwrap();
        std::fs::write(&b, "x,y\n1,3\n").unwrap();

        assert_eq!(digest_file(&a).unwrap(), digest_file(&a).unwrap());
        assert_ne!(digest_file(&a).unwrap(), digest_file(&b).unwrap());
    }

    #[test]
    fn manifest_written_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let manifest = RunManifest {
            seed: 42,
            config_hash: "abc".into(),
            timestamp_count: 3,
            files: vec![FileDigest {
                kind: TableKind::Options,
                path: PathBuf::from("options.csv"),
                rows: 30,
                blake3: "def".into(),
            }],
        };
        write_manifest(&path, &manifest).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"kind\": \"options\""));

        let loaded = read_manifest(&path).unwrap();
        assert_eq!(loaded.file(TableKind::Options).unwrap().rows, 30);
        assert!(loaded.file(TableKind::Spot).is_none());
    }
}
