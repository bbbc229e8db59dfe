use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::{Component, Path, PathBuf};

use log::{debug, warn};

use crate::crc::Crc32;
use crate::error::{Error, Result};
use crate::ini;

pub const DEFAULT_BACKUP_SUFFIX: &str = "_backup";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteMode {
    Truncate,
    Append,
}

/// A directory standing in for the root of an SD card. File names passed to
/// its operations are resolved against that root.
#[derive(Clone, Debug)]
pub struct Volume {
    root: PathBuf,
    mounted: bool,
}

impl Volume {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), mounted: false }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Mounts the volume. Every file operation fails with
    /// [`Error::NotMounted`] until this has succeeded.
    pub fn begin(&mut self) -> Result<()> {
        let metadata = fs::metadata(&self.root)
            .map_err(|source| Error::Mount { root: self.root.clone(), source })?;
        if !metadata.is_dir() {
            return Err(Error::Mount {
                root: self.root.clone(),
                source: io::Error::other("not a directory"),
            });
        }
        self.mounted = true;
        debug!("mounted volume at '{}'", self.root.display());
        Ok(())
    }

    /// CRC-32 of the file's contents, fed into a single accumulator in file order.
    pub fn checksum(&self, name: &str) -> Result<u32> {
        let (path, file) = self.open(name, OpenOptions::new().read(true))?;
        let mut crc = Crc32::new();
        io::copy(&mut BufReader::new(file), &mut crc)
            .map_err(|source| Error::Read { path: path.clone(), source })?;
        debug!("crc32 of '{}' is {:08x}", path.display(), crc.finalize());
        Ok(crc.finalize())
    }

    /// Checksum of `name`, or [`Error::Mismatch`] if it is not `expected`.
    pub fn verify(&self, name: &str, expected: u32) -> Result<u32> {
        let actual = self.checksum(name)?;
        if actual != expected {
            return Err(Error::Mismatch { path: self.root.join(name), expected, actual });
        }
        Ok(actual)
    }

    /// Like [`Volume::checksum`], but reports any failure as 0, which is also
    /// the checksum of an empty file.
    pub fn checksum_or_zero(&self, name: &str) -> u32 {
        self.checksum(name)
            .inspect_err(|e| warn!("{e}"))
            .unwrap_or(0)
    }

    /// Whole file as text, every line (the last one included) ending in `\n`.
    pub fn read(&self, name: &str) -> Result<String> {
        let (path, file) = self.open(name, OpenOptions::new().read(true))?;
        let mut content = String::new();
        BufReader::new(file)
            .read_to_string(&mut content)
            .map_err(|source| Error::Read { path, source })?;
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        Ok(content)
    }

    pub fn write(&self, name: &str, data: &str, mode: WriteMode) -> Result<()> {
        let mut options = OpenOptions::new();
        match mode {
            WriteMode::Truncate => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };
        options.create(true);

        let (path, mut file) = self.open(name, &options)?;
        file.write_all(data.as_bytes())
            .map_err(|source| Error::Write { path, source })
    }

    /// Replaces every occurrence of `search` and returns how many there were.
    pub fn search_and_replace(&self, name: &str, search: &str, replace: &str) -> Result<usize> {
        let content = self.read_filled(name)?;
        if search.is_empty() {
            return Ok(0);
        }

        let count = content.matches(search).count();
        if count == 0 {
            return Ok(0);
        }
        self.write(name, &content.replace(search, replace), WriteMode::Truncate)?;
        debug!("replaced {count} occurrence(s) of '{search}' in '{name}'");
        Ok(count)
    }

    /// Copies `name` to `name` + `suffix` and returns the backup's name.
    pub fn create_backup(&self, name: &str, suffix: &str) -> Result<String> {
        let content = self.read_filled(name)?;
        let backup = format!("{name}{suffix}");
        self.write(&backup, &content, WriteMode::Truncate)?;
        debug!("backed up '{name}' to '{backup}'");
        Ok(backup)
    }

    pub fn append_line(&self, name: &str, data: &str) -> Result<()> {
        self.write(name, &format!("{data}\n"), WriteMode::Append)
    }

    pub fn config_value(&self, name: &str, key: &str) -> Result<Option<String>> {
        let content = self.read(name)?;
        Ok(ini::get(&content, key).map(str::to_owned))
    }

    /// Like [`Volume::config_value`], but a missing key and an unreadable file
    /// both come back as an empty string.
    pub fn config_value_or_empty(&self, name: &str, key: &str) -> String {
        self.config_value(name, key)
            .inspect_err(|e| warn!("{e}"))
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    /// Sets `key` to `value`, appending the entry if the key was not present.
    /// Returns whether an existing entry was replaced.
    pub fn set_config_value(&self, name: &str, key: &str, value: &str) -> Result<bool> {
        let content = self.read_filled(name)?;
        let (content, replaced) = ini::set(&content, key, value);
        self.write(name, &content, WriteMode::Truncate)?;
        debug!("set '{key}' in '{name}' (replaced: {replaced})");
        Ok(replaced)
    }

    fn read_filled(&self, name: &str) -> Result<String> {
        let content = self.read(name)?;
        if content.is_empty() {
            return Err(Error::Empty { path: self.root.join(name) });
        }
        Ok(content)
    }

    fn path(&self, name: &str) -> Result<PathBuf> {
        if !self.mounted {
            return Err(Error::NotMounted { root: self.root.clone() });
        }
        let escapes = Path::new(name).components().any(|component| {
            matches!(component, Component::RootDir | Component::Prefix(_) | Component::ParentDir)
        });
        if escapes {
            return Err(Error::InvalidName { name: name.to_owned() });
        }
        Ok(self.root.join(name))
    }

    fn open(&self, name: &str, options: &OpenOptions) -> Result<(PathBuf, File)> {
        let path = self.path(name)?;
        match options.open(&path) {
            Ok(file) => Ok((path, file)),
            Err(source) => Err(Error::Open { path, source }),
        }
    }
}
