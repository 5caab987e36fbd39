//! Per-room manifests: the row-oriented hand-off to rendering and storage.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{BranchPair, Room};

pub const CSV_HEADER: &str = "Seq,ID,Name,Branch";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRow {
    pub sequence_number: u32,
    pub id: String,
    pub name: String,
    pub branch: String,
}

/// Ordered roster for one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomManifest {
    pub room: String,
    pub pair: Option<BranchPair>,
    pub rows: Vec<ManifestRow>,
}

impl RoomManifest {
    pub fn from_room(room: &Room) -> Self {
        Self {
            room: room.id.clone(),
            pair: room.pair.clone(),
            rows: room
                .seats()
                .iter()
                .map(|seat| ManifestRow {
                    sequence_number: seat.sequence_number,
                    id: seat.candidate.id.clone(),
                    name: seat.candidate.name.clone(),
                    branch: seat.candidate.branch.clone(),
                })
                .collect(),
        }
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::from(CSV_HEADER);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format!(
                "{},{},{},{}\n",
                row.sequence_number,
                csv_field(&row.id),
                csv_field(&row.name),
                csv_field(&row.branch)
            ));
        }
        out
    }

    /// File stem derived from the room label, safe for any filesystem.
    pub fn file_stem(&self) -> String {
        file_stem_for(&self.room)
    }
}

/// Replace anything outside `[A-Za-z0-9._-]` with `_`.
pub fn file_stem_for(label: &str) -> String {
    let stem: String = label
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "room".to_string()
    } else {
        stem
    }
}

/// Quote a CSV field when it contains a delimiter, quote or line break.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// One file stem per manifest, suffixed `-2`, `-3`, ... where sanitized
/// labels collide.
pub fn unique_file_stems(manifests: &[RoomManifest]) -> Vec<String> {
    let mut used = HashSet::new();
    manifests
        .iter()
        .map(|m| {
            let base = m.file_stem();
            let mut stem = base.clone();
            let mut n = 2;
            while !used.insert(stem.clone()) {
                stem = format!("{base}-{n}");
                n += 1;
            }
            stem
        })
        .collect()
}

pub fn manifests_for(rooms: &[Room]) -> Vec<RoomManifest> {
    rooms.iter().map(RoomManifest::from_room).collect()
}

/// Write `<room>.csv` for every manifest into `dir`, creating it if needed.
pub fn write_manifests(dir: &Path, manifests: &[RoomManifest]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("create {:?}", dir))?;
    let mut written = Vec::with_capacity(manifests.len());
    for (manifest, stem) in manifests.iter().zip(unique_file_stems(manifests)) {
        let path = dir.join(format!("{stem}.csv"));
        fs::write(&path, manifest.to_csv()).with_context(|| format!("write {:?}", path))?;
        written.push(path);
    }
    Ok(written)
}

/// Write every manifest as one pretty JSON array.
pub fn write_manifests_json(path: &Path, manifests: &[RoomManifest]) -> Result<()> {
    let content = serde_json::to_string_pretty(manifests).context("serialize manifests")?;
    fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}
