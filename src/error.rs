use thiserror::Error;

/// Failures reading or writing the rules file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access rules file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize rules: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures preparing or loading textures.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to create asset directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write placeholder {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to load texture {path}: {message}")]
    Texture { path: String, message: String },
}
