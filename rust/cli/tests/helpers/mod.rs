//! Shared helpers for the CLI integration tests.
//!
//! - [`cli_runner::CliRunner`] runs the built `bjtrainer` binary inside a
//!   scratch directory and captures exit code, stdout and stderr.
//! - [`temp_files::TempFileManager`] hands out paths under a temporary
//!   directory that is removed on drop.
//!
//! ```rust,ignore
//! let cli = CliRunner::new().expect("cli runner");
//! let tmp = TempFileManager::new().expect("temp dir");
//! let out = tmp.path("rounds.jsonl");
//! let res = cli.run(&["sim", "--rounds", "5", "--output", out.to_str().unwrap()]);
//! assert_eq!(res.exit_code, 0);
//! ```
#![allow(dead_code)]

pub mod cli_runner;
pub mod temp_files;
