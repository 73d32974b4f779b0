//! Interactive chat with the resource assistant

use std::io::IsTerminal as _;
use std::sync::Arc;

use colored::Colorize;

use bizpulse::config::Config;
use bizpulse::core::models::Speaker;
use bizpulse::core::services::{ConversationEngine, ConversationError};
use bizpulse::output::{self, OutputMode};
use bizpulse::runtime::{ConversationSession, TokioClock};

/// Read questions from stdin until EOF or `exit`
pub fn chat(config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
    runtime.block_on(run_session(config, mode))
}

async fn run_session(config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    let engine = ConversationEngine::new(
        Arc::new(config.classifier()),
        Arc::new(config.catalog()?),
        Arc::new(TokioClock),
        config.conversation_settings(),
    );
    let mut session = ConversationSession::new(engine);
    let mut shown = print_new_turns(&session, 0, mode).await;

    let stdin = std::io::stdin();
    if mode == OutputMode::Human && stdin.is_terminal() {
        println!("{}", "Type a question, or 'exit' to quit.".dimmed());
    }

    let mut line = String::new();
    loop {
        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }

        match session.submit_message(line.trim_end()).await {
            Ok(()) => {},
            Err(ConversationError::EmptyMessage) => continue,
            Err(e) => {
                log::warn!("{e}");
                continue;
            },
        }

        if mode == OutputMode::Human && session.is_composing() {
            println!("{}", "assistant is typing...".dimmed());
        }
        session.wait_for_response().await;
        shown = print_new_turns(&session, shown, mode).await;
    }
    Ok(())
}

/// Print turns after the first `shown`; returns the new count
async fn print_new_turns(session: &ConversationSession, shown: usize, mode: OutputMode) -> usize {
    let transcript = session.transcript().await;
    for turn in transcript.iter().skip(shown) {
        // the user just typed it
        if mode == OutputMode::Human && turn.speaker == Speaker::User {
            continue;
        }
        output::render_turn(turn, mode);
    }
    transcript.len()
}
