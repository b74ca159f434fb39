//! kitflik - terminal chat client

mod config;
mod ui;

use clap::Parser;
use std::sync::Arc;

use kitflik_chat::{Conversation, HttpTransport, Transport};
use kitflik_tui::Theme;

/// Endpoint used when neither the CLI flag nor the config file names one
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/api/recommend";

/// kitflik - chat with a prompt endpoint from the terminal
#[derive(Parser, Debug)]
#[command(name = "kitflik")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Prompt endpoint URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Color theme (dark, light)
    #[arg(short, long)]
    theme: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable TUI mode (use simple stdin/stdout)
    #[arg(long)]
    no_tui: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

fn parse_theme(s: &str) -> Theme {
    match s.to_lowercase().as_str() {
        "light" => Theme::light(),
        _ => Theme::dark(),
    }
}

/// Merge CLI flags with the config file: flag over file over default.
fn effective_settings(args: &Args, cfg: &config::Config) -> (String, Theme, bool) {
    let endpoint = args
        .endpoint
        .clone()
        .or_else(|| cfg.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let theme = args
        .theme
        .clone()
        .or_else(|| cfg.theme.clone())
        .map(|s| parse_theme(&s))
        .unwrap_or_default();

    let use_tui = !args.no_tui && cfg.tui.unwrap_or(true);

    (endpoint, theme, use_tui)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup tracing
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("kitflik=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Load config file; CLI flags take precedence
    let cfg = config::Config::load();
    let (endpoint, theme, use_tui) = effective_settings(&args, &cfg);

    tracing::info!(%endpoint, "starting");
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(endpoint));

    if use_tui {
        return ui::run_tui(transport, theme).await;
    }

    run_plain(transport).await
}

/// Simple stdin/stdout mode: same conversation cycle, no TUI.
async fn run_plain(transport: Arc<dyn Transport>) -> anyhow::Result<()> {
    use std::io::{self, IsTerminal, Write};

    let mut conversation = Conversation::new();

    if io::stderr().is_terminal() {
        eprintln!("kitflik (plain mode) - /new starts over, /quit exits");
        eprintln!();
    }

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            // EOF
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);

        match line.trim() {
            "/quit" | "/exit" => break,
            "/new" => {
                conversation.reset();
                println!("Started a new conversation.");
                println!();
                continue;
            }
            _ => {}
        }

        conversation.update_draft(line);
        let Some(prompt) = conversation.submit(line) else {
            continue;
        };

        // Plain mode blocks on the reply, so the request resolves before the
        // next read; the pending gate never rejects here.
        let outcome = transport.send(&prompt).await;
        conversation.resolve(outcome);

        if let Some(reply) = conversation.messages().last() {
            println!("{}", reply.content);
        }
        println!();
    }

    Ok(())
}
