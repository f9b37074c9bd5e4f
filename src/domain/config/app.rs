use std::{collections::HashMap, str::FromStr, time::Duration};

use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_BUCKET: &str = "file-storage-bucket";
const DEFAULT_TABLE: &str = "file-storage-table";
const DEFAULT_HASH_INDEX: &str = "HashIndex";
const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 15 * 60;
// Longest lifetime S3 accepts for a SigV4 presigned URL.
const MAX_PRESIGN_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetadataBackend {
    DynamoDb { table: String, hash_index: String },
    Postgres { database_url: String },
}

impl MetadataBackend {
    pub fn name(&self) -> &'static str {
        match self {
            MetadataBackend::DynamoDb { .. } => "dynamodb",
            MetadataBackend::Postgres { .. } => "postgres",
        }
    }
}

/// Textual replacement applied to presigned URLs when the object store is
/// reached through a different host internally than externally.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlRewrite {
    pub from: String,
    pub to: String,
}

impl UrlRewrite {
    pub fn apply(&self, url: &str) -> String {
        url.replacen(&self.from, &self.to, 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AwsConfig {
    pub region: String,
    pub endpoint_url: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectStoreConfig {
    pub bucket: String,
    pub force_path_style: bool,
    pub presign_expiry: Duration,
    pub url_rewrite: Option<UrlRewrite>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub aws: AwsConfig,
    pub object_store: ObjectStoreConfig,
    pub metadata: MetadataBackend,
    pub max_upload_bytes: usize,
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;

        let endpoint_url = get("AWS_ENDPOINT_URL");
        let aws = AwsConfig {
            region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint_url: endpoint_url.clone(),
            access_key_id: get("AWS_ACCESS_KEY_ID"),
            secret_access_key: get("AWS_SECRET_ACCESS_KEY"),
        };

        let url_rewrite = match (endpoint_url, get("S3_PUBLIC_ENDPOINT")) {
            (Some(from), Some(to)) if from != to => Some(UrlRewrite { from, to }),
            _ => None,
        };

        let presign_expiry_secs = parse_or(
            "PRESIGN_EXPIRY_SECS",
            get("PRESIGN_EXPIRY_SECS"),
            DEFAULT_PRESIGN_EXPIRY_SECS,
        )?;
        if !(1..=MAX_PRESIGN_EXPIRY_SECS).contains(&presign_expiry_secs) {
            return Err(ConfigError::Invalid {
                name: "PRESIGN_EXPIRY_SECS",
                value: presign_expiry_secs.to_string(),
            });
        }

        let object_store = ObjectStoreConfig {
            bucket: get("S3_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            force_path_style: parse_or("S3_FORCE_PATH_STYLE", get("S3_FORCE_PATH_STYLE"), true)?,
            presign_expiry: Duration::from_secs(presign_expiry_secs),
            url_rewrite,
        };

        let metadata = match get("METADATA_BACKEND").as_deref() {
            None | Some("dynamodb") => MetadataBackend::DynamoDb {
                table: get("DYNAMODB_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
                hash_index: get("DYNAMODB_HASH_INDEX")
                    .unwrap_or_else(|| DEFAULT_HASH_INDEX.to_string()),
            },
            Some("postgres") => MetadataBackend::Postgres {
                database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "METADATA_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Ok(Self {
            port,
            aws,
            object_store,
            metadata,
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                get("MAX_UPLOAD_BYTES"),
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
            cors_allowed_origins,
        })
    }
}

fn parse_or<T: FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
