use bedrock_playground::cli::{run_chat, AppContext};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let ctx = AppContext::from_env()?;
    let mut session = ctx.chat_session();

    let stdin = BufReader::new(tokio::io::stdin());
    run_chat(&mut session, stdin, &mut std::io::stdout()).await
}
