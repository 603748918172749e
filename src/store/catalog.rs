// src/store/catalog.rs

use crate::error::AppError;
use regex::Regex;
use std::path::{Path, PathBuf};

/// GADM v4.1 file naming: gadm41_{GID}_{level}.shp
pub fn level_file(base_dir: &Path, gid: &str, level: u8) -> PathBuf {
    base_dir.join(format!("gadm41_{gid}_{level}.shp"))
}

/// Scans the catalog directory for the ADM levels available for a country.
/// Returns levels sorted ascending; empty when the country has no datasets.
pub fn available_levels(base_dir: &Path, gid: &str) -> Result<Vec<u8>, AppError> {
    let pattern = Regex::new(&format!(r"^gadm41_{}_([0-5])\.shp$", regex::escape(gid)))
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let mut levels = Vec::new();
    let entries = match std::fs::read_dir(base_dir) {
        Ok(entries) => entries,
        // A missing catalog directory means no levels, not a server fault.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(levels),
        Err(e) => return Err(e.into()),
    };

    for entry in entries {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if let Some(caps) = pattern.captures(name) {
            if let Ok(level) = caps[1].parse() {
                levels.push(level);
            }
        }
    }

    levels.sort_unstable();
    levels.dedup();
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn scans_only_matching_country_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "gadm41_KEN_1.shp",
            "gadm41_KEN_3.shp",
            "gadm41_KEN_3.dbf",
            "gadm41_TZA_2.shp",
            "gadm41_KEN_9.shp",
            "notes.txt",
        ] {
            File::create(dir.path().join(name)).unwrap();
        }

        let levels = available_levels(dir.path(), "KEN").unwrap();
        assert_eq!(levels, vec![1, 3]);
    }

    #[test]
    fn missing_directory_yields_no_levels() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does_not_exist");
        assert!(available_levels(&missing, "KEN").unwrap().is_empty());
    }
}
