use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::Completer;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tracing_subscriber::EnvFilter;

use djinn_core::conversation::{ConversationController, ConversationEvent, Message, Sender};
use djinn_core::error::SubmitError;
use djinn_infrastructure::paths;
use djinn_infrastructure::{JsonTranscriptRepository, load_config};

const COMMANDS: &[&str] = &["/clear", "/history"];

/// Line helper for the REPL: completes the slash commands, hints their
/// remainders, and tints input the genie would reject as too long.
struct ReplHelper {
    max_message_length: usize,
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if !line.starts_with('/') {
            return Ok((0, Vec::new()));
        }
        let typed = &line[..pos];
        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(typed))
            .map(|cmd| cmd.to_string())
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else if line.chars().count() > self.max_message_length {
            // over the limit; submission would be rejected as-is
            Owned(line.red().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, line: &str, _pos: usize, _forced: bool) -> bool {
        line.starts_with('/') || line.chars().count() > self.max_message_length
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() || !line.starts_with('/') {
            return None;
        }
        COMMANDS
            .iter()
            .find_map(|cmd| cmd.strip_prefix(line))
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    }
}

impl Validator for ReplHelper {}

fn print_message(message: &Message, announce: bool) {
    match message.sender {
        Sender::User => println!("{}", format!("> {}", message.text).green()),
        Sender::Genie => {
            let line = if announce {
                format!("genie: {}", message.text)
            } else {
                message.text.clone()
            };
            println!("{}", line.bright_blue());
        }
    }
}

/// The main entry point for the djinn REPL.
///
/// Wires the out-of-scope view collaborator onto the conversation core:
/// reads lines with rustyline, submits them to the controller, and renders
/// controller events from a background task so replies appear when their
/// simulated latency elapses.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // ===== Backend Initialization =====
    let config = load_config(paths::config_file()?).await?;
    let show_thinking = config.show_thinking_indicator;
    let announce = config.announce_replies;
    let max_message_length = config.max_message_length;

    let repository = Arc::new(JsonTranscriptRepository::default_location()?);
    let controller = Arc::new(ConversationController::new(config, repository)?);
    controller.restore().await;

    let mut events = controller.subscribe().await;

    // Spawn the event printer task; genie replies arrive here after their
    // simulated latency, while the prompt stays responsive.
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                ConversationEvent::MessageAppended { message } => {
                    // user messages are echoed by the REPL loop itself
                    if message.sender == Sender::Genie {
                        print_message(&message, announce);
                    }
                }
                ConversationEvent::ProcessingChanged { processing } => {
                    if processing && show_thinking {
                        println!("{}", "the genie is thinking...".bright_black());
                    }
                }
                ConversationEvent::InputClearRequested => {
                    // rustyline already consumed the line; nothing to clear
                }
                ConversationEvent::HistoryCleared => {
                    println!("{}", "History cleared.".bright_black());
                }
            }
        }
    });

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReplHelper { max_message_length }));

    println!("{}", "=== djinn ===".bright_magenta().bold());
    println!(
        "{}",
        "Make a wish. '/history' shows the conversation, '/clear' discards it, 'quit' exits."
            .bright_black()
    );
    println!();

    // Replay whatever survived the last session
    for message in controller.snapshot().await {
        print_message(&message, announce);
    }

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if trimmed == "/clear" {
                    controller.clear().await;
                    continue;
                }

                if trimmed == "/history" {
                    for message in controller.snapshot().await {
                        print_message(&message, announce);
                    }
                    continue;
                }

                match controller.submit(trimmed).await {
                    Ok(()) => {
                        println!("{}", format!("> {}", trimmed).green());
                    }
                    Err(SubmitError::Busy) => {
                        println!(
                            "{}",
                            "The genie is still composing a reply. Patience.".yellow()
                        );
                    }
                    Err(SubmitError::Invalid(e)) => {
                        println!("{}", e.to_string().red());
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    printer.abort();

    Ok(())
}
