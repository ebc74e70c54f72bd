use anyhow::Result;
use lyra_llm::{ClientFactory, OpenAIConfig};
use lyra_session::{SendPath, Session, SessionConfig, SessionManager};
use std::io::{self, BufRead, Write};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY is required (set it in .env or the environment)"))?;

    let mut config = SessionConfig::default();
    if let Ok(assistant_id) = std::env::var("OPENAI_ASSISTANT_ID") {
        config = config.assistant_id(assistant_id);
    }

    let transport = ClientFactory::create_client(OpenAIConfig::new(api_key))?;
    let manager = SessionManager::new(transport, config);
    let mut session = Session::new();
    let mut use_assistant = true;

    println!("Lyra chat demo");
    println!("Commands: /direct /assistant /reset /export /import <path> /info /health /quit");
    println!();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            "/quit" => break,
            "/direct" => {
                use_assistant = false;
                println!("Using the direct completion path.");
            }
            "/assistant" => {
                use_assistant = true;
                println!("Using the assistant-run path.");
            }
            "/reset" => {
                session.reset();
                println!("Conversation cleared; next message starts a new thread.");
            }
            "/export" => match manager.export_conversation(&session, None).await {
                Ok(path) => println!("Exported to {}", path.display()),
                Err(e) => println!("Export failed: {}", e),
            },
            "/info" => match manager.assistant_info().await {
                Ok(assistant) => {
                    println!("Assistant: {}", assistant.name.as_deref().unwrap_or("unnamed"));
                    println!("  id: {}", assistant.id);
                    println!("  model: {}", assistant.model);
                }
                Err(e) => println!("Could not resolve assistant: {}", e),
            },
            "/health" => {
                let report = manager.health_check().await;
                if report.healthy {
                    println!("Healthy (API connected).");
                } else {
                    println!(
                        "Unhealthy: {}",
                        report.error.unwrap_or_else(|| "unknown".to_string())
                    );
                }
            }
            _ if line.starts_with("/import ") => {
                let path = line.trim_start_matches("/import ").trim();
                match manager.import_conversation(&mut session, Path::new(path)).await {
                    Ok(count) => println!("Imported {} turns into a new thread.", count),
                    Err(e) => println!("Import failed: {}", e),
                }
            }
            message => {
                let path = if use_assistant {
                    SendPath::Assistant
                } else {
                    SendPath::Direct
                };
                match manager.send(&mut session, message, path).await {
                    Ok(reply) => println!("{}", reply),
                    Err(e) => println!("Error: {}", e),
                }
            }
        }
    }

    Ok(())
}
