use super::parse::Stats;
use crate::Error;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::RwLock;

/// Key-addressed memory of evaluator results.
///
/// Entries are never mutated or evicted once written. Writing a key
/// twice is allowed and the later value wins, which is harmless since
/// both came from the same pure function.
pub trait Store {
    fn get(&self, key: &str) -> Option<Vec<Stats>>;
    fn put(&self, key: &str, rows: &[Stats]) -> Result<(), Error>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// pick up entries written by other processes since we last looked
    fn refresh(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// Process-local store. Gone when the process exits.
#[derive(Debug, Default)]
pub struct Memory(RwLock<BTreeMap<String, Vec<Stats>>>);

impl Store for Memory {
    fn get(&self, key: &str) -> Option<Vec<Stats>> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
    fn put(&self, key: &str, rows: &[Stats]) -> Result<(), Error> {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), rows.to_vec());
        Ok(())
    }
    fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// One line of the durable log.
#[derive(Debug, Serialize, Deserialize)]
struct Record {
    key: String,
    rows: Vec<Stats>,
}

/// Durable store backed by an append-only file of JSON lines.
///
/// The whole file is replayed into memory on open. Every put appends
/// one line and syncs it before returning, so a result that was handed
/// back to a caller survives a restart. A writer killed mid-append
/// leaves a final line with no newline; open cuts it off.
#[derive(Debug)]
pub struct Disk {
    path: PathBuf,
    map: Memory,
    file: Mutex<File>,
    /// bytes already replayed, always just past a newline
    offset: Mutex<u64>,
}

impl Disk {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let disk = Self {
            path,
            map: Memory::default(),
            file: Mutex::new(file),
            offset: Mutex::new(0),
        };
        disk.refresh()?;
        disk.repair()?;
        log::info!("{:<32}{:<32}", "opened equity cache", disk.path.display());
        log::info!("{:<32}{:<32}", "cached entries", disk.len());
        Ok(disk)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncates a torn final record back to the last complete line.
    fn repair(&self) -> Result<(), Error> {
        let offset = *self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        let file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        let len = file.metadata()?.len();
        if len > offset {
            log::warn!(
                "{:<32}{:<32}",
                "dropping torn cache record",
                format!("{} bytes at {}", len - offset, offset)
            );
            file.set_len(offset)?;
            file.sync_data()?;
        }
        Ok(())
    }
}

impl Store for Disk {
    fn get(&self, key: &str) -> Option<Vec<Stats>> {
        self.map.get(key)
    }
    fn put(&self, key: &str, rows: &[Stats]) -> Result<(), Error> {
        let record = Record {
            key: key.to_string(),
            rows: rows.to_vec(),
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        {
            let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
            file.write_all(line.as_bytes())?;
            file.sync_data()?;
        }
        self.map.put(key, rows)
    }
    fn len(&self) -> usize {
        self.map.len()
    }
    /// Replays complete lines past the last offset. An unterminated tail
    /// is left for a later call, since its writer may still be going.
    fn refresh(&self) -> Result<(), Error> {
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(*offset))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        let complete = bytes
            .iter()
            .rposition(|b| *b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        for line in bytes[..complete].split(|b| *b == b'\n') {
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            let record = serde_json::from_slice::<Record>(line)?;
            self.map.put(&record.key, &record.rows)?;
        }
        *offset += complete as u64;
        Ok(())
    }
}
