//! # CLI Module
//!
//! Command-line tooling for route tables: inspect what a table compiles to,
//! dry-run a URI through matching and resolution, and lint for rules that
//! can never fire.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! ```bash
//! microroute routes --routes config/routes.yaml
//! ```
//!
//! ### `resolve`
//!
//! ```bash
//! microroute resolve --routes config/routes.yaml --uri /index.php/user/42
//! ```
//!
//! Options:
//! - `--script-name <PREFIX>` - Script/base prefix (default: `/index.php`)
//! - `--strict` - Use the fixpoint normalizer
//!
//! ### `lint`
//!
//! ```bash
//! microroute lint --routes config/routes.yaml --fail-on-error
//! ```
//!
//! `--routes` falls back to `MICROROUTE_ROUTES` for every command.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use microroute::cli::{execute, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! execute(&cli, &mut std::io::stdout())?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{execute, run_cli, Cli, Commands};
