use std::fmt;

use crate::domain::DomainError;

pub const ACCESS_KEY_ENV: &str = "ACCESS_KEY";
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";
pub const REGION_ENV: &str = "AWS_REGION";
pub const OUTPUT_BUCKET_ENV: &str = "S3_BUCKET_NAME";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Account credentials and placement read from the environment.
#[derive(Clone)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub output_bucket: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds credentials from an arbitrary key lookup. Blank values count as
    /// missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &str| {
            get(key).ok_or_else(|| {
                DomainError::configuration(format!("missing required environment variable {key}"))
            })
        };

        Ok(Self {
            access_key: require(ACCESS_KEY_ENV)?,
            secret_key: require(SECRET_KEY_ENV)?,
            region: get(REGION_ENV).unwrap_or_else(|| DEFAULT_REGION.to_string()),
            output_bucket: get(OUTPUT_BUCKET_ENV),
        })
    }

    /// `s3://bucket` destination for async jobs.
    pub fn output_uri(&self) -> Result<String, DomainError> {
        self.output_bucket
            .as_deref()
            .map(|bucket| format!("s3://{}", bucket.trim_start_matches("s3://")))
            .ok_or_else(|| {
                DomainError::configuration(format!(
                    "missing required environment variable {OUTPUT_BUCKET_ENV}"
                ))
            })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &"***")
            .field("secret_key", &"***")
            .field("region", &self.region)
            .field("output_bucket", &self.output_bucket)
            .finish()
    }
}
