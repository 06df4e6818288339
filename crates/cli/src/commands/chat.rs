//! `chat` — chat with the router from the terminal.
//!
//! Single-message mode prints one routed reply; interactive mode keeps
//! one session alive across turns so memory context builds up.

use semroute_core::message::SessionId;
use std::io::{BufRead, Write};

pub async fn run(message: Option<String>) -> anyhow::Result<()> {
    let config = semroute_config::AppConfig::load()?;
    let engine = super::build_engine(&config).await?;
    let session_id = SessionId::new();

    if let Some(message) = message {
        let reply = engine.process_message(session_id, &message).await?;
        println!("[{}] {}", reply.tool_used, reply.response);
        return Ok(());
    }

    println!("semroute interactive chat — empty line or Ctrl-D to exit");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        let reply = engine.process_message(session_id.clone(), line).await?;
        let marker = if reply.degraded { " (degraded)" } else { "" };
        println!("[{}{}] {}", reply.tool_used, marker, reply.response);
    }

    Ok(())
}
