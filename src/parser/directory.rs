use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find JSON files in a directory. If recursive is true, use walkdir; otherwise list files.
/// Results are sorted so batch output does not depend on directory listing order.
pub fn find_json_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut json_files = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            let path = entry.path();
            if crate::parser::filter::is_json_file(path) {
                json_files.push(path.to_path_buf());
            }
        }
    } else {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if crate::parser::filter::is_json_file(&path) {
                json_files.push(path);
            }
        }
    }

    json_files.sort();
    Ok(json_files)
}

/// Identifier for a file found under `root`: its relative path without the
/// extension, using `/` as separator (`sub/b` for `root/sub/b.json`).
pub fn relative_id(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    slash_joined(&relative.with_extension(""))
}

/// Identifiers for `files`, one per file and all distinct.
///
/// Files whose [`relative_id`] collides (`a.json` next to `a.JSON`) keep
/// their extension instead; anything still taken gets a `~N` suffix.
pub fn unique_ids(root: &Path, files: &[PathBuf]) -> Vec<String> {
    let stems: Vec<String> = files.iter().map(|file| relative_id(root, file)).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for stem in &stems {
        *counts.entry(stem.as_str()).or_default() += 1;
    }

    let mut taken = HashSet::new();
    files
        .iter()
        .zip(&stems)
        .map(|(file, stem)| {
            let base = if counts[stem.as_str()] > 1 {
                slash_joined(file.strip_prefix(root).unwrap_or(file))
            } else {
                stem.clone()
            };

            let mut id = base.clone();
            let mut suffix = 2;
            while !taken.insert(id.clone()) {
                id = format!("{}~{}", base, suffix);
                suffix += 1;
            }
            id
        })
        .collect()
}

fn slash_joined(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
