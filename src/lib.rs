//! Preflop equity for two-card poker hands.
//!
//! Cards pack into 32-bit words for fast evaluation. Hands collapse onto
//! 169 canonical classes, and equity for each class comes from the
//! pokerstove `ps-eval` program, asked at most once per question and
//! remembered on disk.
pub mod cards;
pub mod equity;

mod error;
pub use error::Error;
pub use error::Result;

// ============================================================================
// ORACLE
// ============================================================================
/// Evaluator program, looked up on `PATH` unless `PS_EVAL` says otherwise.
pub const PS_EVAL: &str = "ps-eval";

// ============================================================================
// STORAGE
// ============================================================================
/// Append-only log of evaluator results, one JSON record per line.
pub const CACHE_PATH: &str = "cache/equity.jsonl";
/// Home of the per-key lock files under the lock-file exclusion policy.
pub const LOCK_DIR: &str = "cache/locks";

// ============================================================================
// CONTENTION
// ============================================================================
/// Pause between polls while another process computes the same key.
pub const LOCK_INTERVAL: std::time::Duration = std::time::Duration::from_millis(50);
/// Polls before a lock is presumed abandoned. Ten minutes in total.
pub const LOCK_ATTEMPTS: usize = 12_000;

/// Terminal logging at info and a debug log file under `logs/`.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    use anyhow::Context;
    std::fs::create_dir_all("logs").context("create logs directory")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("time moves slow")?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).context("create log file")?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).context("initialize logger")
}
