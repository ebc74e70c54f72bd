use anyhow::Result;
use lyra_llm::{ClientFactory, OpenAIConfig};
use lyra_session::{SendPath, Session, SessionConfig, SessionManager};

#[tokio::main]
async fn main() -> Result<()> {
    let api_key = std::env::var("OPENAI_API_KEY")?;
    let transport = ClientFactory::create_client(OpenAIConfig::new(api_key))?;
    let manager = SessionManager::new(transport, SessionConfig::default());

    let mut session = Session::new();
    let reply = manager
        .send(&mut session, "What is 2+2?", SendPath::Direct)
        .await?;

    println!("Reply: {}", reply);
    Ok(())
}
