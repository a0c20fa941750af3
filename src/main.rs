mod cli;
mod config;
mod editor;
mod index;
mod patch;
mod record;
mod resolver;
mod scan;
mod util;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use editor::{CliEditor, EditorSurface};
use patch::{PatchOutcome, PatchProposal};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: i32 = 1;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    let editor = CliEditor;

    match &cli.command {
        Commands::Scan(args) => {
            let config = Config::load(&args.config).unwrap_or_else(|e| {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(EXIT_FAILURE);
            });

            let directory = util::expand_tilde(&args.directory);
            if !directory.is_dir() {
                eprintln!(
                    "Specified path is not a valid directory: {}",
                    directory.display()
                );
                std::process::exit(EXIT_FAILURE);
            }

            match scan::scan(&directory, &config, args.findings.as_deref(), &editor).await {
                Ok(filename) => println!("{}", filename),
                Err(e) => {
                    eprintln!("Scan failed: {}", e);
                    std::process::exit(EXIT_FAILURE);
                }
            }
        }
        Commands::Apply(args) => {
            let proposal = PatchProposal {
                target_file: args.file.clone(),
                target_line: args.line,
                expected_content: args.expected.clone(),
                replacement_content: args.replacement.clone(),
            };

            match patch::apply_patch(&proposal).await {
                Ok(PatchOutcome::Applied) => {
                    editor.notify("Replacement successful");
                }
                Ok(PatchOutcome::Rejected { expected, actual }) => {
                    editor.notify(&format!(
                        "Replacement rejected: line {} of {} does not match\n  expected: {:?}\n  actual:   {:?}",
                        args.line, args.file, expected, actual
                    ));
                    std::process::exit(EXIT_FAILURE);
                }
                Err(e) => {
                    eprintln!("Replacement failed: {}", e);
                    std::process::exit(EXIT_FAILURE);
                }
            }
        }
        Commands::Resolve(args) => {
            let Some(number) = resolver::resolve_identifier(&args.token) else {
                editor.notify(&format!("'{}' is not a violation identifier", args.token));
                return;
            };

            let records = match index::load_index(Path::new(&args.index)) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_FAILURE);
                }
            };

            let Some(target) = resolver::find_target(&records, number) else {
                editor.notify(&format!("violation_{} is not in the index", number));
                std::process::exit(EXIT_FAILURE);
            };

            editor.notify(&format!("Jumping to violation {}", number));
            if let Err(e) = resolver::navigate(&target, &editor).await {
                eprintln!("Cannot navigate: {}", e);
                std::process::exit(EXIT_FAILURE);
            }
        }
    }
}
