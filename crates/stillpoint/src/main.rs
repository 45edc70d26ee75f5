// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stillpoint - a meditation script service with a persistent cache.
//!
//! This is the binary entry point for the Stillpoint server and its
//! administrative commands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use clap::{Parser, Subcommand};

/// Stillpoint - a meditation script service with a persistent cache.
#[derive(Parser, Debug)]
#[command(name = "stillpoint", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Stillpoint HTTP server.
    Serve,
    /// Inspect or clear the script cache.
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
    /// Print the effective configuration.
    Config,
}

#[derive(Subcommand, Debug)]
enum CacheCommands {
    /// Delete every cached script.
    Clear,
    /// List cached scripts, most recent first.
    List {
        /// Maximum number of rows to show.
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match stillpoint_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            stillpoint_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Cache { command }) => match command {
            CacheCommands::Clear => serve::run_cache_clear(&config).await,
            CacheCommands::List { limit } => serve::run_cache_list(&config, limit).await,
        },
        Some(Commands::Config) => {
            match toml::to_string_pretty(&config) {
                Ok(rendered) => {
                    println!("{rendered}");
                    Ok(())
                }
                Err(e) => Err(stillpoint_core::StillpointError::Internal(format!(
                    "failed to render config: {e}"
                ))),
            }
        }
        None => {
            println!("stillpoint: use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn default_config_renders_as_toml() {
        let config = stillpoint_config::StillpointConfig::default();
        let rendered = toml::to_string_pretty(&config).unwrap();
        assert!(rendered.contains("freshness_days"));
    }
}
