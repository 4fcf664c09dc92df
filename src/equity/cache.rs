use super::lock::Exclusion;
use super::lock::Lock;
use super::lock::Patience;
use super::oracle::Oracle;
use super::parse::Stats;
use super::parse::scan;
use super::query::Query;
use super::store::Store;
use crate::Error;

/// Memoizing front for an [`Oracle`].
///
/// Results are keyed by [`Query::key`] and kept forever: equity is a
/// pure function of the query, so there is nothing to expire. A miss
/// runs the oracle once, synchronously, and stores the parsed result
/// before handing it back. Failures are never stored.
///
/// The stages are public so the miss path can be driven by hand:
/// [`Cache::lookup`], then [`Cache::compute`] and [`Cache::store`].
#[derive(Debug)]
pub struct Cache<O, S> {
    oracle: O,
    store: S,
    exclusion: Exclusion,
    patience: Patience,
}

impl<O, S> Cache<O, S>
where
    O: Oracle,
    S: Store,
{
    pub fn new(oracle: O, store: S) -> Self {
        Self {
            oracle,
            store,
            exclusion: Exclusion::default(),
            patience: Patience::default(),
        }
    }
    pub fn with_exclusion(self, exclusion: Exclusion) -> Self {
        Self { exclusion, ..self }
    }
    pub fn with_patience(self, patience: Patience) -> Self {
        Self { patience, ..self }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }
    pub fn storage(&self) -> &S {
        &self.store
    }

    pub fn lookup(&self, query: &Query) -> Option<Vec<Stats>> {
        self.store.get(&query.key())
    }

    /// Always asks the oracle, never touches the store.
    pub fn compute(&self, query: &Query) -> Result<Vec<Stats>, Error> {
        let output = self.oracle.consult(query)?;
        let stats = scan(&output)?
            .into_iter()
            .map(Stats::try_from)
            .collect::<Result<Vec<Stats>, Error>>()?;
        log::debug!("{} -> {:?}", query, stats);
        Ok(stats)
    }

    pub fn store(&self, query: &Query, stats: &[Stats]) -> Result<(), Error> {
        log::info!("{:<32}{:<32}", "caching equity", query.key());
        self.store.put(&query.key(), stats)
    }

    pub fn evaluate(&self, query: &Query) -> Result<Vec<Stats>, Error> {
        if let Some(stats) = self.lookup(query) {
            return Ok(stats);
        }
        match self.exclusion {
            Exclusion::Redundant => self.miss(query),
            Exclusion::LockFile(ref dir) => self.exclusive(query, dir),
        }
    }

    fn miss(&self, query: &Query) -> Result<Vec<Stats>, Error> {
        let stats = self.compute(query)?;
        self.store(query, &stats)?;
        Ok(stats)
    }

    /// Miss path under a per-key lock file. Waiters poll the store until
    /// the holder publishes. A holder that outlives the wait budget, or a
    /// lock file older than it, is presumed dead: the file is removed and
    /// the key is taken over.
    fn exclusive(&self, query: &Query, dir: &std::path::Path) -> Result<Vec<Stats>, Error> {
        let key = query.key();
        let budget = self.patience.budget();
        for _ in 0..self.patience.attempts {
            match Lock::acquire(dir, &key)? {
                Some(_lock) => return self.locked(query),
                None if Lock::is_stale(dir, &key, budget)? => Lock::reclaim(dir, &key)?,
                None => {
                    std::thread::sleep(self.patience.interval);
                    self.store.refresh()?;
                    if let Some(stats) = self.lookup(query) {
                        return Ok(stats);
                    }
                }
            }
        }
        log::warn!("gave up waiting on lock for {}", key);
        Lock::reclaim(dir, &key)?;
        match Lock::acquire(dir, &key)? {
            Some(_lock) => self.locked(query),
            None => self.miss(query),
        }
    }

    /// someone may have published between our last look and the lock
    fn locked(&self, query: &Query) -> Result<Vec<Stats>, Error> {
        self.store.refresh()?;
        match self.lookup(query) {
            Some(stats) => Ok(stats),
            None => self.miss(query),
        }
    }
}
