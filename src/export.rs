use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use crate::analysis::{analyze, AnalysisResult};
use crate::error::ExportError;
use crate::normalize::normalize_export;
use crate::user::{RelationshipCollection, RelationshipKind, User};
use crate::validation::classify;

/// Directories inside an unpacked data archive that may hold the exports,
/// relative to the archive root, in lookup order.
const ARCHIVE_SUBDIRS: &[&str] = &["connections/followers_and_following", "followers_and_following", ""];

/// Files that make up one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    /// Followers parts, merged in order
    pub followers: Vec<PathBuf>,
    pub following: PathBuf,
}

/// Locate the followers and following exports inside an unpacked archive.
pub fn discover_archive(archive_dir: &Path) -> Result<ExportPaths> {
    if !archive_dir.is_dir() {
        anyhow::bail!("Archive directory not found: {:?}", archive_dir);
    }

    for subdir in ARCHIVE_SUBDIRS {
        let dir = archive_dir.join(subdir);
        let following = dir.join("following.json");
        if !following.is_file() {
            continue;
        }

        let followers = find_follower_parts(&dir)?;
        if followers.is_empty() {
            anyhow::bail!("No followers export found next to {:?}", following);
        }

        info!(
            action = "resolve",
            component = "archive_discovery",
            directory = ?dir,
            follower_parts = followers.len(),
            "Found relationship exports"
        );
        return Ok(ExportPaths {
            followers,
            following,
        });
    }

    anyhow::bail!("No following.json found in archive {:?}", archive_dir)
}

/// `followers.json` / `followers_<n>.json` in `dir`, ordered by part number.
fn find_follower_parts(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut parts: Vec<(u32, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {:?}", dir))? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(part) = follower_part_number(name) {
            parts.push((part, path));
        }
    }

    parts.sort_by_key(|(part, _)| *part);
    Ok(parts.into_iter().map(|(_, path)| path).collect())
}

fn follower_part_number(file_name: &str) -> Option<u32> {
    let stem = file_name.strip_prefix("followers")?.strip_suffix(".json")?;
    if stem.is_empty() {
        return Some(0);
    }
    stem.strip_prefix('_')?.parse().ok()
}

/// Parse file contents as JSON. Malformed JSON is an invalid export that
/// carries the raw text.
pub fn parse_json(content: &str) -> std::result::Result<Value, ExportError> {
    serde_json::from_str(content).map_err(|e| ExportError::InvalidFormat {
        reason: format!("malformed JSON: {}", e),
        payload: Value::String(content.to_string()),
    })
}

/// Read, validate and normalize one export file.
pub fn read_export(path: &Path, kind: RelationshipKind) -> Result<Vec<User>> {
    let start_time = Instant::now();

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {} export {:?}", kind, path))?;

    let users = parse_json(&content)
        .and_then(|value| classify(&value, kind))
        .and_then(|export| normalize_export(&export))
        .with_context(|| format!("Failed to load {} export {:?}", kind, path))?;

    info!(
        action = "load",
        component = "export_file",
        kind = %kind,
        file_path = ?path,
        user_count = users.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Loaded export file"
    );
    Ok(users)
}

/// Load every part of one relationship kind into a single collection.
pub fn load_collection(paths: &[PathBuf], kind: RelationshipKind) -> Result<RelationshipCollection> {
    let mut users = Vec::new();
    for path in paths {
        users.extend(read_export(path, kind)?);
    }

    let record_count = users.len();
    let collection: RelationshipCollection = users.into_iter().collect();

    if collection.is_empty() {
        warn!(
            action = "load",
            component = "relationship_collection",
            kind = %kind,
            "Export contains no accounts"
        );
    } else if collection.len() < record_count {
        info!(
            action = "dedupe",
            component = "relationship_collection",
            kind = %kind,
            duplicates = record_count - collection.len(),
            "Collapsed duplicate usernames"
        );
    }

    Ok(collection)
}

/// Run the whole pipeline over the given files.
pub fn analyze_export_files(paths: &ExportPaths) -> Result<AnalysisResult> {
    let total_start_time = Instant::now();
    info!(
        action = "start",
        component = "analysis",
        "Starting relationship analysis"
    );

    let followers = load_collection(&paths.followers, RelationshipKind::Followers)?;
    let following = load_collection(std::slice::from_ref(&paths.following), RelationshipKind::Following)?;

    let result = analyze(followers, following);

    info!(
        action = "complete",
        component = "analysis",
        followers = result.followers.len(),
        following = result.following.len(),
        not_following_back = result.not_following_back.len(),
        duration_ms = total_start_time.elapsed().as_millis(),
        "Analysis completed successfully"
    );
    Ok(result)
}
