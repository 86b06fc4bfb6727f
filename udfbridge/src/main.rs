///
/// udfbridge CLI - inspect what the bridge was built against
///
/// Commands:
/// - udfbridge constants: print exported constants (text or JSON)
/// - udfbridge options <file>: validate a TOML options file
///

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::Level;

use udfbridge::RegisterOptions;
use udfbridge::constants::ExportedConstants;

#[derive(Parser)]
#[command(name = "udfbridge")]
#[command(author, version, about = "SQLite function registration bridge", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the constants exported to host integration layers
    Constants {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Validate a registration options file and print its flag word
    Options {
        /// TOML file with deterministic / direct_only / innocuous keys
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match cli.command {
        Commands::Constants { json } => {
            print_constants(json);
        }
        Commands::Options { path } => {
            check_options(&path);
        }
    }
}

fn print_constants(json: bool) {
    let constants = ExportedConstants::collect();

    if json {
        match serde_json::to_string_pretty(&constants) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing constants: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("SQLITE_INTEGER        {}", constants.sqlite_integer);
    println!("SQLITE_FLOAT          {}", constants.sqlite_float);
    println!("SQLITE_TEXT           {}", constants.sqlite_text);
    println!("SQLITE_BLOB           {}", constants.sqlite_blob);
    println!("SQLITE_NULL           {}", constants.sqlite_null);
    println!("SQLITE_UTF8           {}", constants.sqlite_utf8);
    println!("SQLITE_DETERMINISTIC  {:#x}", constants.sqlite_deterministic);
    println!("SQLITE_DIRECTONLY     {:#x}", constants.sqlite_directonly);
    println!("SQLITE_INNOCUOUS      {:#x}", constants.sqlite_innocuous);
    println!("MAX_FUNCTION_ARG      {}", constants.max_function_arg);
    println!(
        "SQLITE_VERSION        {} ({})",
        constants.sqlite_version, constants.sqlite_version_number
    );
    println!(
        "WINDOW_FUNCTIONS      {} (requires {})",
        if constants.window_supported { "supported" } else { "unsupported" },
        constants.window_min_version
    );
}

fn check_options(path: &Path) {
    match RegisterOptions::load(path) {
        Ok(options) => {
            tracing::debug!(?options, "loaded options");
            println!("text_rep = {:#x}", options.text_rep());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
