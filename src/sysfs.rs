use crate::error::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read access to the power supply class directory.
/// Points at `/sys/class/power_supply` in production, at a temp directory in tests.
#[derive(Debug, Clone)]
pub struct PowerSupplyDir {
    dir: PathBuf,
}

impl Default for PowerSupplyDir {
    fn default() -> Self {
        Self::new(crate::config::Config::default().power_supply_dir)
    }
}

impl PowerSupplyDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of one attribute file, e.g. `attribute_path("BAT0", "status")`
    /// -> `/sys/class/power_supply/BAT0/status`.
    pub fn attribute_path(&self, supply: impl AsRef<OsStr>, attribute: &str) -> PathBuf {
        self.dir.join(supply.as_ref()).join(attribute)
    }

    /// Read one attribute of one supply as raw bytes.
    ///
    /// With `limit` unset (or zero) the whole value is returned. Otherwise a
    /// single `read` call fetches at most `limit` bytes. Most sysfs attributes
    /// only answer the first read after an open, so the file is never seeked
    /// or read line by line.
    pub fn read_attribute(
        &self,
        supply: impl AsRef<OsStr>,
        attribute: &str,
        limit: Option<usize>,
    ) -> Result<Vec<u8>> {
        let path = self.attribute_path(supply, attribute);
        let mut file = match File::open(&path) {
            Ok(f) => f,
            Err(source) => return Err(Error::Read { path, source }),
        };

        let mut buf = Vec::new();
        let outcome = match limit.filter(|&n| n > 0) {
            Some(n) => {
                buf.resize(n, 0);
                file.read(&mut buf).map(|got| buf.truncate(got))
            }
            None => file.read_to_end(&mut buf).map(|_| ()),
        };
        if let Err(source) = outcome {
            return Err(Error::Read { path, source });
        }

        tracing::trace!(path = %path.display(), bytes = buf.len(), "read attribute");
        Ok(buf)
    }

    /// Names of all entries directly under the directory, sorted bytewise.
    /// Names are kept as the OS returns them, valid UTF-8 or not.
    pub fn list_entries(&self) -> Result<Vec<OsString>> {
        let enumeration = |source: std::io::Error| Error::Enumeration {
            path: self.dir.clone(),
            source,
        };
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(enumeration)? {
            names.push(entry.map_err(enumeration)?.file_name());
        }
        names.sort();
        Ok(names)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
