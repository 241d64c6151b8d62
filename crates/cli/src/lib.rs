//! Shared pieces of the `pbm` command line tool
//!
//! - TOML configuration ([`config::PbmConfig`])
//! - Bookmarks file I/O with backup and atomic replace ([`util`])
//! - Coloured unified diffs for dry runs ([`diff_utils`])
//! - Locating the `Bookmarks` files of installed browser profiles ([`profiles`])

pub mod config;
pub mod diff_utils;
pub mod profiles;
pub mod util;

pub use config::PbmConfig;
