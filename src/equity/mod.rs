pub mod cache;
pub use cache::*;

pub mod config;
pub use config::*;

pub mod game;
pub use game::*;

pub mod lock;
pub use lock::*;

pub mod oracle;
pub use oracle::*;

pub mod parse;
pub use parse::*;

pub mod query;
pub use query::*;

pub mod store;
pub use store::*;
