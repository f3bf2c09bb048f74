// src/main.rs

use clap::Parser;
use mylog::cli::{Cli, Commands};
use mylog::commands;
use mylog::config::Settings;
use mylog::logging::init_logging;
use mylog::{LogStore, Result};

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::resolve(cli.db, cli.log_dir, cli.log_level)?;
    init_logging(&settings.log_level, &settings.log_dir)?;

    // 整个进程只打开一次，交给各个命令使用
    let mut store = LogStore::open(&settings.db_path)?;

    match cli.command {
        Commands::Init => commands::handle_init(&store, &settings.db_path),
        Commands::Add {
            title,
            message,
            full_title,
        } => commands::handle_add(&mut store, title, message, full_title),
        Commands::List { json } => commands::handle_list(&store, json),
        Commands::Del { rows, yes } => commands::handle_del(&mut store, &rows, yes),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        log::error!("event=cli_exit module=cli status=error error={}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
