//! Configuration loader with environment variable support

use super::Config;
use crate::error::Result;
use config::{Environment, File};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config = config::Config::builder()
        .add_source(File::from(path.as_ref()))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    Ok(cfg)
}

/// Load configuration from a TOML file with `CHROMA_EXTRAS__*` overrides.
///
/// A `.env` file in the working directory is read first when present.
pub fn load_config_with_env<P: AsRef<Path>>(path: P) -> Result<Config> {
    dotenvy::dotenv().ok();

    let config = config::Config::builder()
        .add_source(File::from(path.as_ref()))
        .add_source(
            Environment::with_prefix("CHROMA_EXTRAS")
                .separator("__")
                .try_parsing(true)
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}.toml", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_applies_defaults() {
        let path = write_config(
            "chroma_extras_loader",
            r#"
[cohere]
api_key = "cohere-key"

[nomic]
api_key = "nomic-key"
dimensionality = 256
task_type = "search_query"

[logging]
format = "pretty"
"#,
        );

        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let cohere = config.cohere.unwrap();
        assert_eq!(cohere.api_key.expose_secret(), "cohere-key");
        assert_eq!(cohere.model_name, "rerank-v3.5");
        assert_eq!(cohere.http.max_retries, 3);

        let nomic = config.nomic.unwrap();
        assert_eq!(nomic.dimensionality, Some(256));
        assert_eq!(nomic.task_type, Some(crate::config::TaskType::SearchQuery));

        assert!(config.mistral.is_none());
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_bare_nomic_section_matches_constructor_defaults() {
        let path = write_config("chroma_extras_loader_nomic", "[nomic]\napi_key = \"k\"\n");

        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let loaded = config.nomic.unwrap();
        let built = crate::config::NomicConfig::new("k");

        assert_eq!(loaded.task_type, Some(crate::config::TaskType::SearchDocument));
        assert_eq!(loaded.long_text_mode, Some(crate::config::LongTextMode::Truncate));
        assert_eq!(loaded.task_type, built.task_type);
        assert_eq!(loaded.long_text_mode, built.long_text_mode);
        assert_eq!(loaded.dimensionality, built.dimensionality);
        assert_eq!(loaded.max_tokens_per_text, built.max_tokens_per_text);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_config("/definitely/not/here.toml");
        assert!(matches!(result, Err(crate::error::ExtrasError::Config(_))));
    }
}
