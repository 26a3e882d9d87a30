use bedrock_playground::cli::AppContext;
use bedrock_playground::domain::payloads::TitanImageRequest;
use rand::Rng;
use std::process::ExitCode;
use tracing::error;

/// Upper bound of the seed range the image model accepts.
const MAX_SEED: u32 = 2_147_483_647;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let ctx = AppContext::from_env()?;
    let image = &ctx.config.config.image;
    let prompts = &ctx.config.prompts.image;

    let seed = image
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen_range(0..=MAX_SEED));
    let request = TitanImageRequest::new(&prompts.text, image.generation_config(seed))
        .with_negative_text(prompts.negative_text.clone());

    let images = match ctx
        .generation()
        .generate_images(&ctx.config.config.models.image, &request)
        .await
    {
        Ok(images) => images,
        Err(e) if e.is_fatal() => return Err(e.into()),
        Err(e) => {
            error!(error = %e, "image generation failed");
            println!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let directory = ctx.image_directory();
    for bytes in &images {
        let path = directory.save(bytes).await?;
        println!("The generated image has been saved to {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}
