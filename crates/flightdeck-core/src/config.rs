//! Key/value configuration stores.
//!
//! Bindings are persisted as one string per binding name. The engine only
//! needs three operations from a store, captured by [`ConfigStore`]; the two
//! implementations here cover tests and simple file-backed setups.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// A persistent string key/value store.
pub trait ConfigStore {
    /// Get the value stored under `key`, if any.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_string(&mut self, key: &str, value: &str);

    /// Flush pending changes to the backing storage.
    fn save(&mut self) -> Result<()>;

    /// Read an integer flag, falling back to `default` when absent or malformed.
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_string(key)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map_or(default, |v| v != 0)
    }
}

/// In-memory store. `save` is a no-op that only counts calls.
#[derive(Debug, Default, Clone)]
pub struct MemoryConfig {
    values: IndexMap<String, String>,
    saves: usize,
}

impl MemoryConfig {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for seeding tests.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Number of times [`ConfigStore::save`] was called.
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl ConfigStore for MemoryConfig {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn save(&mut self) -> Result<()> {
        self.saves += 1;
        Ok(())
    }
}

/// File-backed store using a flat `key=value` format.
///
/// Blank lines and lines starting with `#` or `;` are ignored when reading
/// and written back unchanged by [`IniConfig::save`]. Existing keys stay on
/// their original line; new keys are appended in the order they were set.
#[derive(Debug)]
pub struct IniConfig {
    path: PathBuf,
    lines: Vec<IniLine>,
    values: IndexMap<String, String>,
    dirty: bool,
}

/// One line of the backing file, as it will be written back.
#[derive(Debug, Clone, PartialEq, Eq)]
enum IniLine {
    Verbatim(String),
    Entry(String),
}

impl IniConfig {
    /// Load the file at `path`. A missing file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let (lines, values) = match fs::read_to_string(&path) {
            Ok(text) => parse_ini(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Config file {} not found, starting empty", path.display());
                (Vec::new(), IndexMap::new())
            }
            Err(e) => return Err(e.into()),
        };

        info!("Loaded {} config entries from {}", values.len(), path.display());

        Ok(Self {
            path,
            lines,
            values,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Iterate over all entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn render(&self) -> String {
        fn push_entry(text: &mut String, key: &str, value: &str) {
            text.push_str(key);
            text.push('=');
            text.push_str(value);
            text.push('\n');
        }

        let mut text = String::new();

        let mut written = 0;
        for line in &self.lines {
            match line {
                IniLine::Verbatim(raw) => {
                    text.push_str(raw);
                    text.push('\n');
                }
                IniLine::Entry(key) => {
                    if let Some(value) = self.values.get(key) {
                        push_entry(&mut text, key, value);
                        written += 1;
                    }
                }
            }
        }
        // Keys from the file come first in `values`, so the rest are new.
        for (key, value) in self.values.iter().skip(written) {
            push_entry(&mut text, key, value);
        }
        text
    }
}

impl ConfigStore for IniConfig {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: &str) {
        if self.values.get(key).map(String::as_str) != Some(value) {
            self.values.insert(key.to_string(), value.to_string());
            self.dirty = true;
        }
    }

    fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(self.render().as_bytes())?;
        file.persist(&self.path).map_err(|e| e.error)?;
        self.dirty = false;

        debug!("Saved {} config entries to {}", self.values.len(), self.path.display());
        Ok(())
    }
}

fn parse_ini(text: &str) -> Result<(Vec<IniLine>, IndexMap<String, String>)> {
    let mut lines = Vec::new();
    let mut values = IndexMap::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            lines.push(IniLine::Verbatim(raw.to_string()));
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(Error::Config {
                line: index + 1,
                message: format!("expected key=value, got {line:?}"),
            });
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::Config {
                line: index + 1,
                message: "empty key".to_string(),
            });
        }
        // A repeated key keeps its first line and the last value.
        if values.insert(key.to_string(), value.trim().to_string()).is_none() {
            lines.push(IniLine::Entry(key.to_string()));
        }
    }
    Ok((lines, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_config_roundtrip() {
        let mut config = MemoryConfig::new().with("Fire", "Key32");
        assert_eq!(config.get_string("Fire").as_deref(), Some("Key32"));
        assert_eq!(config.get_string("Missing"), None);

        config.set_string("Fire", "disabled");
        config.save().unwrap();
        assert_eq!(config.get_string("Fire").as_deref(), Some("disabled"));
        assert_eq!(config.save_count(), 1);
    }

    #[test]
    fn get_bool_defaults() {
        let config = MemoryConfig::new()
            .with("On", "1")
            .with("Off", "0")
            .with("Junk", "yes");
        assert!(config.get_bool("On", false));
        assert!(!config.get_bool("Off", true));
        assert!(config.get_bool("Junk", true));
        assert!(!config.get_bool("Missing", false));
    }

    #[test]
    fn parse_skips_comments() {
        let (lines, values) =
            parse_ini("# bindings\n\n; legacy\nFire = Key32,disabled\nPitch=disabled\n").unwrap();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], IniLine::Verbatim("# bindings".to_string()));
        assert_eq!(values.len(), 2);
        assert_eq!(values["Fire"], "Key32,disabled");
        assert_eq!(values["Pitch"], "disabled");
    }

    #[test]
    fn parse_rejects_missing_separator() {
        let err = parse_ini("Fire=Key32\nbogus\n").unwrap_err();
        assert!(matches!(err, Error::Config { line: 2, .. }));
    }

    #[test]
    fn ini_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let config = IniConfig::load(dir.path().join("absent.ini")).unwrap();
        assert_eq!(config.entries().count(), 0);
    }

    #[test]
    fn ini_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("bindings.ini");

        let mut config = IniConfig::load(&path).unwrap();
        config.set_string("Fire", "Key32Mod3");
        config.set_string("Pitch", "disabled,disabled,Key119,Key115");
        config.save().unwrap();

        let reloaded = IniConfig::load(&path).unwrap();
        assert_eq!(reloaded.get_string("Fire").as_deref(), Some("Key32Mod3"));
        assert_eq!(
            reloaded.get_string("Pitch").as_deref(),
            Some("disabled,disabled,Key119,Key115")
        );
        let keys: Vec<_> = reloaded.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, ["Fire", "Pitch"]);
    }

    #[test]
    fn ini_save_keeps_comments_and_line_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bindings.ini");
        fs::write(&path, "# Flight\nPitch=disabled\n\n; Weapons\nFire=Key32\n").unwrap();

        let mut config = IniConfig::load(&path).unwrap();
        config.set_string("Fire", "Key102");
        config.set_string("Roll", "disabled");
        config.save().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Flight\nPitch=disabled\n\n; Weapons\nFire=Key102\nRoll=disabled\n"
        );
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
