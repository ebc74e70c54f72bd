//! Walkthrough of the assistant management surface: list, resolve, switch,
//! and smoke-test the active assistant.

use anyhow::Result;
use lyra_llm::{ClientFactory, OpenAIConfig};
use lyra_session::{SendPath, Session, SessionConfig, SessionManager};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("OPENAI_API_KEY")?;
    let transport = ClientFactory::create_client(OpenAIConfig::new(api_key))?;
    let manager = SessionManager::new(transport, SessionConfig::default());

    println!("1. Listing assistants...");
    let assistants = manager.list_assistants().await?;
    if assistants.is_empty() {
        println!("   (none visible to these credentials)");
    }
    for (i, assistant) in assistants.iter().enumerate() {
        println!(
            "   {}. {} [{}] ({})",
            i + 1,
            assistant.name.as_deref().unwrap_or("unnamed"),
            assistant.model,
            assistant.id
        );
    }

    println!("\n2. Resolving the active assistant...");
    let assistant = manager.assistant_info().await?;
    println!(
        "   Active: {} ({})",
        assistant.name.as_deref().unwrap_or("unnamed"),
        assistant.id
    );

    // Pass an id on the command line to switch assistants explicitly.
    if let Some(id) = std::env::args().nth(1) {
        println!("\n3. Switching to {}...", id);
        match manager.set_assistant_by_id(&id).await {
            Ok(assistant) => println!("   Now using {}", assistant.id),
            Err(e) => println!("   Switch failed, keeping previous assistant: {}", e),
        }
    }

    println!("\n4. Health check...");
    let report = manager.health_check().await;
    println!(
        "   {}",
        if report.healthy { "healthy" } else { "unhealthy" }
    );
    if let Some(error) = report.error {
        println!("   error: {}", error);
    }

    println!("\n5. Test message...");
    let mut session = Session::new();
    let reply = manager
        .send(
            &mut session,
            "Hello! Can you tell me a short joke?",
            SendPath::Assistant,
        )
        .await?;
    println!("   {}", reply);

    Ok(())
}
