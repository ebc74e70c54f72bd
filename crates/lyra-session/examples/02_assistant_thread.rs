use anyhow::Result;
use lyra_llm::{ClientFactory, OpenAIConfig};
use lyra_session::{SendPath, Session, SessionConfig, SessionManager};

#[tokio::main]
async fn main() -> Result<()> {
    let api_key = std::env::var("OPENAI_API_KEY")?;
    let transport = ClientFactory::create_client(OpenAIConfig::new(api_key))?;
    let manager = SessionManager::new(transport, SessionConfig::default());

    let assistant = manager.assistant_info().await?;
    println!(
        "Using assistant {} ({})",
        assistant.name.as_deref().unwrap_or("unnamed"),
        assistant.id
    );

    // Both sends land on the same thread; the assistant sees the whole
    // conversation.
    let mut session = Session::new();
    let reply = manager
        .send(&mut session, "My name is Ada.", SendPath::Assistant)
        .await?;
    println!("Reply: {}", reply);

    let reply = manager
        .send(&mut session, "What is my name?", SendPath::Assistant)
        .await?;
    println!("Reply: {}", reply);

    println!("Thread: {:?}", session.thread_id());

    let path = manager.export_conversation(&session, None).await?;
    println!("Conversation exported to {}", path.display());

    Ok(())
}
