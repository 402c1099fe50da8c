//! Ava application binary - composition root.
//!
//! Ties the Ava crates together into a single terminal assistant:
//! 1. Load configuration from TOML
//! 2. Open the JSON memory snapshot under the data directory
//! 3. Build the memory store and the dialogue engine
//! 4. Run a line-based conversation loop until EOF or `quit`
//!
//! Each caller line is echoed back with the assistant's reply, a tone
//! readout from the emotion analyzer, and any contextual suggestions.
//! The transcript is flushed to memory when the session ends.

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use ava_core::config::AvaConfig;
use ava_dialogue::{analyze_emotions, DialogueEngine};
use ava_memory::{JsonFileBackend, MemoryStore};

use cli::CliArgs;

/// Expand ~ to home directory in a path string.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if data_dir.starts_with("~/") || data_dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&data_dir[2..])
    } else {
        PathBuf::from(data_dir)
    }
}

fn print_prompt() -> std::io::Result<()> {
    use std::io::Write;
    print!("You: ");
    std::io::stdout().flush()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is loaded before tracing because its log_level feeds the filter.
    let config_file = args.resolve_config_path();
    let config = AvaConfig::load_or_default(&config_file);

    // Tracing. Priority: --log-level flag > RUST_LOG > config value.
    let filter = match args.resolve_log_level() {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting Ava v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Memory store over a JSON snapshot in the data directory.
    let data_dir = resolve_data_dir(
        &args
            .resolve_data_dir()
            .unwrap_or_else(|| config.general.data_dir.clone()),
    );
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::error!(path = %data_dir.display(), error = %e, "Failed to create data directory");
        return Err(e.into());
    }
    let snapshot_path = data_dir.join("memory.json");
    let store = Arc::new(
        MemoryStore::new(Box::new(JsonFileBackend::new(&snapshot_path)))
            .with_assistant(config.assistant.clone()),
    );
    tracing::info!(path = %snapshot_path.display(), "Memory store ready");

    let mut engine = DialogueEngine::new(Arc::clone(&store)).with_config(&config);

    if let Some(contact) = args.contact.as_deref() {
        engine.identify(contact);
        tracing::info!("Caller pre-identified from --contact");
    }

    let assistant = config.assistant.name.clone();
    tracing::info!("Session started");
    println!("{}: {}", assistant, engine.initial_greeting(Local::now()));
    print_prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            print_prompt()?;
            continue;
        }
        if input.eq_ignore_ascii_case("quit") {
            break;
        }

        let emotions = analyze_emotions(input);
        if !emotions.is_empty() {
            let readout = emotions
                .iter()
                .map(|e| format!("{} {:.2}", e.emotion, e.score))
                .collect::<Vec<_>>()
                .join(", ");
            println!("  [tone: {}]", readout);
        }

        let reply = engine.process_input(input);
        println!("{}: {}", assistant, reply.message);
        if let Some(suggestions) = &reply.suggestions {
            for suggestion in suggestions {
                println!("  • {}", suggestion);
            }
        }
        print_prompt()?;
    }

    engine.end_session(Local::now());
    tracing::info!("Session ended");
    println!(
        "{}: Thank you for calling the {}. Goodbye!",
        assistant, config.assistant.authority
    );

    Ok(())
}
