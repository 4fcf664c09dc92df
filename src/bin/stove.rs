//! Stove Binary
//!
//! Preflop equity through a persistent cache in front of `ps-eval`.
//!
//! Commands: warmup, equity, query

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use rayon::prelude::*;
use stove::cards::Canonical;
use stove::cards::Hand;
use stove::equity::Config;
use stove::equity::Exclusion;
use stove::equity::Game;
use stove::equity::Query;
use stove::equity::Store;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// evaluator program, a name on PATH or a path
    #[arg(long, global = true)]
    program: Option<PathBuf>,
    /// cache file
    #[arg(long, global = true)]
    cache: Option<PathBuf>,
    /// redundant | lockfile | lockfile:<dir>
    #[arg(long, global = true)]
    exclusion: Option<Exclusion>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Evaluate all 169 preflop hand classes into the cache")]
    Warmup,
    #[command(about = "Preflop equity of one hand against a random hand", alias = "eq")]
    Equity {
        #[arg(required = true)]
        hand: String,
    },
    #[command(about = "Evaluate hands against each other, optionally on a board", alias = "q")]
    Query {
        #[arg(required = true)]
        hands: Vec<String>,
        #[arg(long)]
        board: Option<String>,
        #[arg(long, default_value_t = Game::Holdem)]
        game: Game,
    },
}

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::from_env().context("read environment")?;
        if let Some(ref program) = self.program {
            config.program = program.clone();
        }
        if let Some(ref cache) = self.cache {
            config.cache = cache.clone();
        }
        if let Some(ref exclusion) = self.exclusion {
            config.exclusion = exclusion.clone();
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    stove::log()?;
    let args = Args::parse();
    let cache = args.config()?.open().context("open equity cache")?;
    match args.command {
        Command::Warmup => {
            let classes = Canonical::exhaust();
            log::info!("{:<32}{:<32}", "warming hand classes", classes.len());
            let failures = classes
                .par_iter()
                .map(|canonical| cache.evaluate(&Query::from(*canonical)))
                .filter_map(Result::err)
                .inspect(|e| log::error!("{}", e))
                .count();
            match failures {
                0 => Ok(log::info!("{:<32}{:<32}", "cached entries", cache.storage().len())),
                n => anyhow::bail!("{} of {} hand classes failed", n, classes.len()),
            }
        }
        Command::Equity { hand } => {
            let hand = Hand::try_from(hand.as_str())?;
            let equity = hand.equity(&cache)?;
            Ok(println!("{} ({}) {:.4}", hand, hand.canonical(), equity))
        }
        Command::Query { hands, board, game } => {
            let query = Query::new(&hands, board.as_deref(), game)?;
            for (hand, stats) in query.hands().iter().zip(cache.evaluate(&query)?) {
                println!("{:<8} {}", hand, stats);
            }
            Ok(())
        }
    }
}
