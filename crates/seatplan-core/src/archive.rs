//! Bundles rendered documents into a single gzip-compressed tarball.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::info;

/// Archive every regular file directly inside `src_dir` into `dest`
/// (`.tar.gz`), sorted by file name. Returns the archived entry names.
pub fn archive_directory(src_dir: &Path, dest: &Path) -> Result<Vec<String>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(src_dir).with_context(|| format!("read {:?}", src_dir))? {
        let path = entry
            .with_context(|| format!("read entry in {:?}", src_dir))?
            .path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("create {:?}", parent))?;
        }
    }
    let file = File::create(dest).with_context(|| format!("create {:?}", dest))?;
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::best());
    let mut builder = tar::Builder::new(encoder);

    let mut names = Vec::with_capacity(files.len());
    for path in &files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        builder
            .append_path_with_name(path, name)
            .with_context(|| format!("append {:?}", path))?;
        names.push(name.to_string());
    }

    let encoder = builder.into_inner().context("finish tar stream")?;
    let mut writer = encoder.finish().context("finish gzip stream")?;
    writer.flush().with_context(|| format!("flush {:?}", dest))?;

    info!(entries = names.len(), archive = ?dest, "documents archived");
    Ok(names)
}
