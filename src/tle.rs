use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use sgp4::{Constants, Elements};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TleError {
    #[error("TLE directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("invalid TLE in {file}: {message}")]
    InvalidTle { file: String, message: String },
    #[error("satellite '{0}' not found")]
    NotFound(String),
    #[error("no element sets loaded")]
    NoSatellites,
}

pub struct TleEntry {
    pub name: String,
    pub norad_id: u64,
    pub source: String,
    pub elements: Elements,
    pub constants: Constants,
}

pub struct TleStore {
    dir: PathBuf,
    satellites: HashMap<u64, TleEntry>,
}

impl TleStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            satellites: HashMap::new(),
        }
    }

    /// Load every `.tle`/`.txt` file in the directory. Files that fail to
    /// parse are skipped with a warning; nothing loaded at all is an error.
    pub fn load_all(&mut self) -> Result<(), TleError> {
        if !self.dir.exists() {
            return Err(TleError::DirectoryNotFound(self.dir.display().to_string()));
        }

        self.satellites.clear();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension() else {
                continue;
            };
            if ext != "tle" && ext != "txt" {
                continue;
            }
            match parse_tle_file(&path) {
                Ok(entries) => {
                    for tle_entry in entries {
                        self.satellites.insert(tle_entry.norad_id, tle_entry);
                    }
                }
                Err(e) => {
                    log::warn!("skipping TLE file {}: {}", path.display(), e);
                }
            }
        }

        if self.satellites.is_empty() {
            return Err(TleError::NoSatellites);
        }
        log::info!("loaded {} element sets", self.satellites.len());
        Ok(())
    }

    /// Case-insensitive substring match over satellite names. Several
    /// matches resolve to the first in name order.
    pub fn find(&self, name: &str) -> Result<&TleEntry, TleError> {
        let needle = name.to_lowercase();
        let mut matches: Vec<&TleEntry> = self
            .satellites
            .values()
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));

        if matches.len() > 1 {
            log::info!(
                "{} satellites match '{}', using {}",
                matches.len(),
                name,
                matches[0].name
            );
        }
        matches
            .first()
            .copied()
            .ok_or_else(|| TleError::NotFound(name.to_string()))
    }
}

fn parse_tle_file(path: &Path) -> Result<Vec<TleEntry>, TleError> {
    let content = fs::read_to_string(path)?;
    let source = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    parse_tle_content(&content, &source)
}

fn parse_tle_content(content: &str, source: &str) -> Result<Vec<TleEntry>, TleError> {
    let mut entries = Vec::new();

    for (name, line1, line2) in split_tle_groups(content) {
        let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes()).map_err(
            |e| TleError::InvalidTle {
                file: source.to_string(),
                message: e.to_string(),
            },
        )?;
        let constants = Constants::from_elements(&elements).map_err(|e| TleError::InvalidTle {
            file: source.to_string(),
            message: e.to_string(),
        })?;

        let name = elements
            .object_name
            .clone()
            .unwrap_or_else(|| format!("NORAD {}", elements.norad_id));

        entries.push(TleEntry {
            name,
            norad_id: elements.norad_id,
            source: source.to_string(),
            elements,
            constants,
        });
    }

    Ok(entries)
}

/// Split raw TLE text into (name, line1, line2) groups; both 2-line and
/// named 3-line records may appear in one file.
fn split_tle_groups(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut groups = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            groups.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            groups.push((
                Some(lines[i].to_string()),
                lines[i + 1].to_string(),
                lines[i + 2].to_string(),
            ));
            i += 3;
        } else {
            i += 1;
        }
    }

    groups
}
