use crate::linter::{has_errors, lint_table, write_lint_issues};
use crate::path::{normalize, normalize_strict};
use crate::router::{resolve_target, Router};
use crate::table::load_table;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Command-line interface for microroute
///
/// Inspects, lints and dry-runs route tables without a host.
#[derive(Parser, Debug)]
#[command(name = "microroute")]
#[command(about = "microroute CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the compiled rules in declaration order
    Routes {
        /// Route table file (YAML or JSON)
        #[arg(short, long, env = "MICROROUTE_ROUTES")]
        routes: PathBuf,
    },
    /// Show where a URI would be dispatched, without running anything
    Resolve {
        /// Route table file (YAML or JSON)
        #[arg(short, long, env = "MICROROUTE_ROUTES")]
        routes: PathBuf,

        /// Request URI, e.g. `/index.php/user/42?tab=posts`
        #[arg(short, long)]
        uri: String,

        /// Script/base prefix stripped before matching
        #[arg(long, default_value = "/index.php")]
        script_name: String,

        /// Use the fixpoint normalizer
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Lint a route table
    ///
    /// Reports rules that do not compile, can never match, are shadowed by an
    /// identical earlier pattern or name a capture group they do not have.
    Lint {
        /// Route table file (YAML or JSON)
        #[arg(short, long, env = "MICROROUTE_ROUTES")]
        routes: PathBuf,

        /// Exit with an error if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,
    },
}

fn compile(routes: &Path) -> anyhow::Result<Router> {
    let table = load_table(routes)?;
    Router::new(&table).with_context(|| format!("failed to compile {}", routes.display()))
}

/// Run a parsed command, writing its report to `out`.
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Routes { routes } => {
            compile(routes)?.dump_routes(out)?;
            Ok(())
        }
        Commands::Resolve {
            routes,
            uri,
            script_name,
            strict,
        } => {
            let router = compile(routes)?;
            let path = if *strict {
                normalize_strict(uri, script_name)
            } else {
                normalize(uri, script_name)
            };
            writeln!(out, "path:       {path:?}", path = path.as_str())?;

            let route_match = router.route(&path)?;
            writeln!(out, "pattern:    {}", route_match.pattern)?;
            writeln!(out, "captures:   {:?}", &route_match.captures[..])?;

            let target = resolve_target(&route_match)?;
            let leftover: Vec<&str> = path.segments().skip(target.arg_start).collect();
            writeln!(out, "controller: {}", target.controller)?;
            writeln!(out, "method:     {}", target.method)?;
            writeln!(out, "arguments:  {leftover:?}")?;
            Ok(())
        }
        Commands::Lint {
            routes,
            fail_on_error,
        } => {
            let table = load_table(routes)?;
            let issues = lint_table(&table);
            write_lint_issues(out, &issues)?;
            if *fail_on_error && has_errors(&issues) {
                anyhow::bail!("lint found errors in {}", routes.display());
            }
            Ok(())
        }
    }
}

/// Parse `std::env::args` and run the command against stdout.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    execute(&cli, &mut io::stdout().lock())
}
