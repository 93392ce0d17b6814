//! mincecalc 命令列程式

use std::io::{self, IsTerminal};

use clap::Parser;
use craft_cli::cli::{Cli, Command, LogFormatArg};
use craft_cli::commands::{run_convert, run_craft, run_recipes};
use craft_cli::logging::{init_logging, LogConfig, LogFormat};
use craft_cli::Menu;
use craft_store::DataStore;

fn main() {
    let cli = Cli::parse();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: 無法初始化日誌: {error}");
        std::process::exit(1);
    }

    let store = DataStore::open(&cli.config, &cli.recipes);
    let exit_code = match run(cli.command, store) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: Option<Command>, store: DataStore) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();

    match command {
        Some(Command::Convert { amount }) => run_convert(&store, &amount, &mut out),
        Some(Command::Craft { item, amount }) => run_craft(&store, &item, &amount, &mut out),
        Some(Command::Recipes) => run_recipes(&store, &mut out),
        None => Menu::new(store, io::stdin().lock(), out).run(),
    }
}

/// 由命令列旗標建立日誌設定；指定 -v/-q 時忽略 `RUST_LOG`
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig::default()
        .with_level_filter(cli.verbosity.tracing_level_filter())
        .with_env_filter(!cli.verbosity.is_present())
        .with_ansi(io::stderr().is_terminal())
        .with_format(match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        })
}
