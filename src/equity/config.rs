use super::cache::Cache;
use super::lock::Exclusion;
use super::lock::Patience;
use super::oracle::PokerStove;
use super::store::Disk;
use crate::Error;
use crate::Result;
use std::path::PathBuf;

/// Where the oracle lives, where results are kept, and how concurrent
/// misses are handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub program: PathBuf,
    pub cache: PathBuf,
    pub exclusion: Exclusion,
    pub patience: Patience,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program: PathBuf::from(crate::PS_EVAL),
            cache: PathBuf::from(crate::CACHE_PATH),
            exclusion: Exclusion::default(),
            patience: Patience::default(),
        }
    }
}

impl Config {
    /// Defaults, overridden by `PS_EVAL`, `EQUITY_CACHE`,
    /// `EQUITY_EXCLUSION` and `EQUITY_LOCK_WAIT` (seconds) when set.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(program) = var("PS_EVAL") {
            config.program = PathBuf::from(program);
        }
        if let Some(cache) = var("EQUITY_CACHE") {
            config.cache = PathBuf::from(cache);
        }
        if let Some(exclusion) = var("EQUITY_EXCLUSION") {
            config.exclusion = exclusion.parse().map_err(Error::Config)?;
        }
        if let Some(wait) = var("EQUITY_LOCK_WAIT") {
            let wait = wait
                .parse::<u64>()
                .map_err(|e| Error::Config(format!("EQUITY_LOCK_WAIT {:?}: {}", wait, e)))?;
            let interval = config.patience.interval.as_millis().max(1);
            config.patience.attempts = (u128::from(wait) * 1000).div_ceil(interval) as usize;
        }
        Ok(config)
    }

    pub fn open(&self) -> Result<Cache<PokerStove, Disk>> {
        log::info!("{:<32}{:<32}", "equity oracle", self.program.display());
        log::info!("{:<32}{:<32?}", "exclusion policy", self.exclusion);
        Ok(
            Cache::new(PokerStove::new(&self.program), Disk::open(&self.cache)?)
                .with_exclusion(self.exclusion.clone())
                .with_patience(self.patience),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<String, String>>();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.program, PathBuf::from("ps-eval"));
        assert_eq!(config.exclusion, Exclusion::Redundant);
    }

    #[test]
    fn environment_overrides() {
        let config = Config::from_vars(vars(&[
            ("PS_EVAL", "/opt/pokerstove/bin/ps-eval"),
            ("EQUITY_CACHE", "/tmp/equity.jsonl"),
            ("EQUITY_EXCLUSION", "lockfile:/tmp/locks"),
        ]))
        .unwrap();
        assert_eq!(config.program, PathBuf::from("/opt/pokerstove/bin/ps-eval"));
        assert_eq!(config.cache, PathBuf::from("/tmp/equity.jsonl"));
        assert_eq!(config.exclusion, Exclusion::LockFile(PathBuf::from("/tmp/locks")));
    }

    #[test]
    fn lock_wait_in_seconds() {
        let config = Config::from_vars(vars(&[("EQUITY_LOCK_WAIT", "3")])).unwrap();
        assert_eq!(config.patience.interval, crate::LOCK_INTERVAL);
        assert_eq!(config.patience.budget(), std::time::Duration::from_secs(3));
        assert!(matches!(
            Config::from_vars(vars(&[("EQUITY_LOCK_WAIT", "soon")])),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn bad_policy_is_rejected() {
        let config = Config::from_vars(vars(&[("EQUITY_EXCLUSION", "optimistic")]));
        assert!(matches!(config, Err(Error::Config(_))));
    }

    #[test]
    fn opens_a_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            cache: dir.path().join("equity.jsonl"),
            ..Config::default()
        };
        let cache = config.open().unwrap();
        assert_eq!(cache.oracle().program(), config.program.as_path());
        assert!(dir.path().join("equity.jsonl").exists());
    }
}
