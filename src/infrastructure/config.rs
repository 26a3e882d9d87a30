use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::application::services::{DEFAULT_NO_CONTEXT, DEFAULT_QA_TEMPLATE};
use crate::domain::{
    payloads::{ImageGenerationConfig, VideoGenerationConfig},
    DistanceMetric, DomainError, InferenceConfig,
};

pub const CONFIG_PATH_ENV: &str = "APP_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/default.yaml";

/// Non-secret settings plus prompt texts. Credentials live in
/// [`crate::infrastructure::Credentials`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub config: Config,
    pub prompts: PromptsConfig,
}

impl AppConfig {
    /// Reads the file named by `APP_CONFIG`, else `config/default.yaml` when it
    /// exists, else built-in defaults. A named file that is missing or invalid
    /// is a configuration error.
    pub fn load() -> Result<Self, DomainError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim())),
            _ => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::from_file(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!("failed to read config {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            DomainError::Configuration(msg) => {
                DomainError::configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, DomainError> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| DomainError::configuration(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), DomainError> {
        let rag = &self.config.rag;
        if rag.chunk_size == 0 || rag.chunk_overlap >= rag.chunk_size {
            return Err(DomainError::configuration(format!(
                "rag.chunk_overlap ({}) must be smaller than rag.chunk_size ({})",
                rag.chunk_overlap, rag.chunk_size
            )));
        }
        if !self.prompts.rag.template.contains("{question}") {
            return Err(DomainError::configuration(
                "prompts.rag.template must contain a {question} placeholder",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub models: ModelsConfig,
    pub text: InferenceConfig,
    pub chat: ChatConfig,
    pub rag: RagConfig,
    pub image: ImageConfig,
    pub video: VideoConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub text: String,
    pub chat: String,
    pub rag: String,
    pub embedding: String,
    pub image: String,
    pub video: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            text: "anthropic.claude-3-5-sonnet-20240620-v1:0".to_string(),
            chat: "anthropic.claude-3-sonnet-20240229-v1:0".to_string(),
            rag: "anthropic.claude-3-sonnet-20240229-v1:0".to_string(),
            embedding: "amazon.titan-embed-text-v1".to_string(),
            image: "amazon.titan-image-generator-v2:0".to_string(),
            video: "amazon.nova-reel-v1:0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_tokens: 100,
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub document_path: PathBuf,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub distance: DistanceMetric,
    pub embedding_dimension: usize,
    pub inference: InferenceConfig,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from("resume.pdf"),
            chunk_size: 1000,
            chunk_overlap: 100,
            top_k: 3,
            distance: DistanceMetric::L2,
            embedding_dimension: 1536,
            inference: InferenceConfig::new(0.0, 1024),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub number_of_images: u32,
    pub quality: String,
    pub cfg_scale: f32,
    pub height: u32,
    pub width: u32,
    /// Fixed seed; a random one is drawn per run when unset.
    pub seed: Option<u32>,
    pub output_dir: PathBuf,
    pub file_prefix: String,
}

impl ImageConfig {
    pub fn generation_config(&self, seed: u32) -> ImageGenerationConfig {
        ImageGenerationConfig {
            number_of_images: self.number_of_images,
            quality: self.quality.clone(),
            cfg_scale: self.cfg_scale,
            height: self.height,
            width: self.width,
            seed,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            number_of_images: 1,
            quality: "standard".to_string(),
            cfg_scale: 8.0,
            height: 512,
            width: 512,
            seed: None,
            output_dir: PathBuf::from("output"),
            file_prefix: "titan".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub duration_seconds: u32,
    pub fps: u32,
    pub dimension: String,
    pub seed: u32,
}

impl VideoConfig {
    pub fn generation_config(&self) -> VideoGenerationConfig {
        VideoGenerationConfig {
            duration_seconds: self.duration_seconds,
            fps: self.fps,
            dimension: self.dimension.clone(),
            seed: self.seed,
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 6,
            fps: 24,
            dimension: "1280x720".to_string(),
            seed: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is not set.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    pub text: TextPrompts,
    pub chat: ChatPrompts,
    pub rag: RagPrompts,
    pub image: ImagePrompts,
    pub video: VideoPrompts,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextPrompts {
    pub system: String,
    pub user: String,
}

impl Default for TextPrompts {
    fn default() -> Self {
        Self {
            system: "You are an AI assistant, and you need to answer the user's question."
                .to_string(),
            user: "How many states are there in the United States of America?".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatPrompts {
    pub system: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RagPrompts {
    pub template: String,
    pub no_context: String,
}

impl Default for RagPrompts {
    fn default() -> Self {
        Self {
            template: DEFAULT_QA_TEMPLATE.to_string(),
            no_context: DEFAULT_NO_CONTEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImagePrompts {
    pub text: String,
    pub negative_text: Option<String>,
}

impl Default for ImagePrompts {
    fn default() -> Self {
        Self {
            text: "A stylized picture of a cute cat".to_string(),
            negative_text: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VideoPrompts {
    pub text: String,
}

impl Default for VideoPrompts {
    fn default() -> Self {
        Self {
            text: "Long shot of a large tiger walking through the grass.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.config.rag.chunk_size, 1000);
        assert_eq!(config.config.rag.chunk_overlap, 100);
        assert_eq!(config.config.rag.top_k, 3);
        assert_eq!(config.config.text.max_tokens, 100);
        assert_eq!(config.config.image.file_prefix, "titan");
        assert_eq!(config.config.video.dimension, "1280x720");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml(
            r#"
config:
  text:
    temperature: 0.0
    max_tokens: 100
  rag:
    top_k: 5
    distance: cosine
prompts:
  image:
    text: "A watercolor fox"
"#,
        )
        .unwrap();

        assert_eq!(config.config.text.max_tokens, 100);
        assert_eq!(config.config.rag.top_k, 5);
        assert_eq!(config.config.rag.distance, DistanceMetric::Cosine);
        assert_eq!(config.config.rag.chunk_size, 1000);
        assert_eq!(config.prompts.image.text, "A watercolor fox");
        assert_eq!(config.config.models.video, "amazon.nova-reel-v1:0");
    }

    #[test]
    fn test_invalid_chunking_is_configuration_error() {
        let result = AppConfig::from_yaml("config:\n  rag:\n    chunk_size: 100\n    chunk_overlap: 100\n");
        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let result = AppConfig::from_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }
}
