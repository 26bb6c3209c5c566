//! tagsense - markup completion from the command line
//!
//! Feeds a document to an editor session up to a cursor offset and prints
//! the completions valid there.
//!
//! # Usage
//!
//! ```bash
//! # Completions at the end of a file
//! tagsense page.html
//!
//! # Completions at byte 120, as JSON
//! tagsense --offset 120 --format json page.html
//!
//! # Registered doctypes
//! tagsense --doctypes
//! ```

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use tagsense::cli::CliInterface;
use tagsense::error::Result;
use tagsense::{CandidateList, CursorContext, EditorSession, SchemaRegistry};

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands, or build the registry and complete
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(());
    }

    let registry = Arc::new(SchemaRegistry::from_config(&cli.config().schemas).await?);

    if cli.args().doctypes {
        let doctypes = CandidateList::from(registry.doctype_completion_data());
        println!("{}", cli.render(&CursorContext::DocType, &doctypes)?);
        return Ok(());
    }

    let text = cli.read_document().await?;
    let offset = cli.cursor_offset(&text);

    let mut session = EditorSession::new(registry, cli.config());
    let update = session.on_edit(&text, offset);
    debug!("Parsed {} bytes up to offset {}", update.fed, offset);

    let context = session.cursor_context();
    let candidates = complete_with_interrupt(&mut session).await;
    session.close();

    match candidates {
        Some(list) => {
            println!("{}", cli.render(&context, &list)?);
            Ok(())
        }
        None => {
            eprintln!("Completion cancelled");
            Ok(())
        }
    }
}

/// Run a completion request that Ctrl+C cancels
async fn complete_with_interrupt(session: &mut EditorSession) -> Option<CandidateList> {
    let cancel_token = CancellationToken::new();
    let cancel_token_clone = cancel_token.clone();

    let ctrl_c_handle = tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => cancel_token_clone.cancel(),
            Err(err) => eprintln!("Failed to listen for Ctrl+C: {}", err),
        }
    });

    let result = session.complete(&cancel_token).await;
    ctrl_c_handle.abort();
    result
}

/// Initialize logging system based on the configured level
///
/// `RUST_LOG` directives, when set, refine the configured level.
///
/// # Arguments
/// * `cli` - CLI interface with verbosity settings already applied
fn initialize_logging(cli: &CliInterface) {
    let level = cli.config().logging.level.to_tracing_level();
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
