use crate::Error;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// How concurrent misses on the same key are handled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Exclusion {
    /// Every miss computes. Racing callers may evaluate the same key
    /// more than once; the last write wins.
    #[default]
    Redundant,
    /// One advisory lock file per key under this directory. Whoever
    /// creates it computes; everyone else waits for the result.
    LockFile(PathBuf),
}

impl std::str::FromStr for Exclusion {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "redundant" => Ok(Exclusion::Redundant),
            "lockfile" => Ok(Exclusion::LockFile(PathBuf::from(crate::LOCK_DIR))),
            other => match other.strip_prefix("lockfile:") {
                Some(dir) if !dir.is_empty() => Ok(Exclusion::LockFile(PathBuf::from(dir))),
                _ => Err(format!("unknown exclusion policy {:?}", other)),
            },
        }
    }
}

/// How long a waiter polls a held lock before declaring its holder dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patience {
    pub interval: Duration,
    pub attempts: usize,
}

impl Default for Patience {
    fn default() -> Self {
        Self {
            interval: crate::LOCK_INTERVAL,
            attempts: crate::LOCK_ATTEMPTS,
        }
    }
}

impl Patience {
    /// Total wait. A lock file older than this is stale on sight.
    pub fn budget(&self) -> Duration {
        self.interval.saturating_mul(self.attempts.try_into().unwrap_or(u32::MAX))
    }
}

/// A held per-key lock file. Removed on drop.
///
/// The file holds the holder's process id for whoever goes looking.
#[derive(Debug)]
pub struct Lock(PathBuf);

impl Lock {
    /// `Ok(None)` when someone else holds the key.
    pub fn acquire(dir: &Path, key: &str) -> Result<Option<Self>, Error> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(Self::name(key));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                let lock = Self(path);
                writeln!(file, "{}", std::process::id())?;
                Ok(Some(lock))
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Whether a lock on the key has gone untouched for longer than `age`.
    /// A missing lock is not stale.
    pub fn is_stale(dir: &Path, key: &str, age: Duration) -> Result<bool, Error> {
        match std::fs::metadata(dir.join(Self::name(key))) {
            Ok(meta) => Ok(meta
                .modified()?
                .elapsed()
                .map(|elapsed| elapsed > age)
                .unwrap_or(false)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Removes a lock left behind by a holder that never released it.
    pub fn reclaim(dir: &Path, key: &str) -> Result<(), Error> {
        let path = dir.join(Self::name(key));
        log::warn!("{:<32}{:<32}", "reclaiming stale lock", path.display());
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// keys carry `|` and `,`, which not every filesystem likes
    fn name(key: &str) -> String {
        key.chars()
            .map(|c| match c.is_ascii_alphanumeric() {
                true => c,
                false => '_',
            })
            .chain(".lock".chars())
            .collect()
    }
}

impl Drop for Lock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.0) {
            log::warn!("failed to release {}: {}", self.0.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_holder_at_a_time() {
        let dir = tempfile::tempdir().unwrap();
        let held = Lock::acquire(dir.path(), "h|-|AhKd").unwrap();
        assert!(held.is_some());
        assert!(Lock::acquire(dir.path(), "h|-|AhKd").unwrap().is_none());
        assert!(Lock::acquire(dir.path(), "h|-|AhKh").unwrap().is_some());
        drop(held);
        assert!(Lock::acquire(dir.path(), "h|-|AhKd").unwrap().is_some());
    }

    #[test]
    fn holder_pid_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let _held = Lock::acquire(dir.path(), "h|-|AhKd").unwrap().unwrap();
        let contents = std::fs::read_to_string(dir.path().join(Lock::name("h|-|AhKd"))).unwrap();
        assert_eq!(contents.trim(), std::process::id().to_string());
    }

    #[test]
    fn old_locks_are_stale() {
        let dir = tempfile::tempdir().unwrap();
        let key = "h|-|QhQd";
        assert!(!Lock::is_stale(dir.path(), key, Duration::ZERO).unwrap());
        std::mem::forget(Lock::acquire(dir.path(), key).unwrap().unwrap());
        assert!(!Lock::is_stale(dir.path(), key, Duration::from_secs(3600)).unwrap());
        std::fs::File::options()
            .write(true)
            .open(dir.path().join(Lock::name(key)))
            .unwrap()
            .set_modified(std::time::SystemTime::now() - Duration::from_secs(7200))
            .unwrap();
        assert!(Lock::is_stale(dir.path(), key, Duration::from_secs(3600)).unwrap());
        Lock::reclaim(dir.path(), key).unwrap();
        Lock::reclaim(dir.path(), key).unwrap();
        assert!(Lock::acquire(dir.path(), key).unwrap().is_some());
    }

    #[test]
    fn patience_budget() {
        let patience = Patience {
            interval: Duration::from_millis(50),
            attempts: 12_000,
        };
        assert_eq!(patience.budget(), Duration::from_secs(600));
        assert_eq!(Patience::default(), patience);
    }

    #[test]
    fn file_names_are_tame() {
        assert_eq!(Lock::name("h|5c8s9h|AcAs,Kh4d"), "h_5c8s9h_AcAs_Kh4d.lock");
    }

    #[test]
    fn parse_policy() {
        assert_eq!("redundant".parse::<Exclusion>(), Ok(Exclusion::Redundant));
        assert_eq!(
            "lockfile:/tmp/locks".parse::<Exclusion>(),
            Ok(Exclusion::LockFile(PathBuf::from("/tmp/locks")))
        );
        assert!(matches!("lockfile".parse::<Exclusion>(), Ok(Exclusion::LockFile(_))));
        assert!("mutex".parse::<Exclusion>().is_err());
    }
}
