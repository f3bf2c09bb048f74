// src/cli.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "mylog - keep short titled log entries in a local database",
    long_about = "mylog stores short log entries (a title, a body and an optional full title) in a local SQLite database and lists them sorted by title."
)]
pub struct Cli {
    /// Database file. Defaults to ~/.config/mylog/mylog.db
    #[arg(long, global = true, env = "MYLOG_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Directory for rotating log files. Defaults to ~/.config/mylog/logs
    #[arg(long, global = true, env = "MYLOG_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error|off
    #[arg(long, global = true, env = "MYLOG_LOG_LEVEL", value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Creates the database if needed and reports how many entries it holds.
    Init,

    /// Adds a new entry and saves it.
    /// If no text is provided via -m, it opens the default editor.
    Add {
        /// Entry title. May be empty.
        #[arg(default_value = "")]
        title: String,

        #[arg(short, long, help = "The entry body")]
        message: Option<String>,

        #[arg(short, long, help = "An alternate, longer title")]
        full_title: Option<String>,
    },

    /// Lists all entries sorted by title, one numbered row each.
    List {
        #[arg(long, help = "Print the entries as JSON")]
        json: bool,
    },

    /// Deletes entries by their row number in `mylog list`.
    #[command(verbatim_doc_comment)]
    Del {
        /// Row numbers as shown by `mylog list`.
        /// Examples:
        ///   mylog del 5          (deletes row 5)
        ///   mylog del 3,5,8      (deletes rows 3, 5, 8)
        ///   mylog del 7-9        (deletes rows 7, 8, 9)
        ///   mylog del 3,7-9,12   (deletes rows 3, 7, 8, 9, 12)
        #[arg(value_name = "ROW_LIST")]
        rows: String,

        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}
