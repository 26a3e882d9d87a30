use bedrock_playground::cli::AppContext;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let ctx = AppContext::from_env()?;
    let config = &ctx.config.config;
    let prompts = &ctx.config.prompts.text;

    let result = ctx
        .generation()
        .generate_text(
            &config.models.text,
            Some(prompts.system.as_str()).filter(|s| !s.trim().is_empty()),
            &prompts.user,
            &config.text,
        )
        .await;

    match result {
        Ok(response) => {
            println!("Response: {}", response.text);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_fatal() => Err(e.into()),
        Err(e) => {
            error!(error = %e, "text generation failed");
            println!("Error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
