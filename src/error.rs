use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(
        "Unknown model \"{input}\" (expected one of gemini-2-flash, gemini-2-flash-lite, gemini-1-5-flash, gemini-1-5-pro)"
    )]
    UnknownModel { input: String },

    #[error(
        "Unknown unit kind \"{input}\" (expected text, image, video, audio, output or training)"
    )]
    UnknownUnitKind { input: String },

    #[error("Unknown unit scale \"{input}\" (expected raw, k or m)")]
    UnknownUnitScale { input: String },

    #[error("Invalid share link \"{input}\": {source}")]
    InvalidShareUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display_model() {
        let e = AppError::UnknownModel {
            input: "gpt-9".to_string(),
        };
        assert!(e.to_string().starts_with(r#"Unknown model "gpt-9""#));
    }

    #[test]
    fn app_error_display_scale() {
        let e = AppError::UnknownUnitScale {
            input: "giga".to_string(),
        };
        assert_eq!(e.to_string(), r#"Unknown unit scale "giga" (expected raw, k or m)"#);
    }

    #[test]
    fn app_error_display_share_url() {
        let source = url::Url::parse("not a url").unwrap_err();
        let e = AppError::InvalidShareUrl {
            input: "not a url".to_string(),
            source,
        };
        assert_eq!(
            e.to_string(),
            r#"Invalid share link "not a url": relative URL without a base"#
        );
    }

    #[test]
    fn app_error_display_config_read() {
        let e = AppError::ConfigRead {
            path: PathBuf::from("/nope/config.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(e.to_string(), "Failed to read config /nope/config.toml: missing");
    }

    #[test]
    fn app_error_from_io_error() {
        let io = std::io::Error::other("broken pipe");
        let app: AppError = io.into();
        assert_eq!(app.to_string(), "broken pipe");
    }
}
