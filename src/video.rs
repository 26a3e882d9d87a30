use bedrock_playground::cli::AppContext;
use bedrock_playground::domain::payloads::NovaReelRequest;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let ctx = AppContext::from_env()?;
    let output_uri = ctx.credentials.output_uri()?;

    let request = NovaReelRequest::new(
        &ctx.config.prompts.video.text,
        ctx.config.config.video.generation_config(),
    );

    match ctx
        .generation()
        .start_video(&ctx.config.config.models.video, &request, &output_uri)
        .await
    {
        Ok(handle) => {
            println!("{}", serde_json::to_string_pretty(&handle)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_fatal() => Err(e.into()),
        Err(e) => {
            error!(error = %e, "video job submission failed");
            println!("Error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
