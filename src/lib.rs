//! Contributor collection from Git history, persisted as JSON and served read-only over HTTP.
//!
//! The batch side (`collect`) runs `history` → `record` (with `identity`) → `store`;
//! the `server` side only ever reads what `store` wrote.

pub mod cli;
pub mod collect;
pub mod gitio;
pub mod history;
pub mod identity;
pub mod model;
pub mod record;
pub mod server;
pub mod store;
pub mod util;
