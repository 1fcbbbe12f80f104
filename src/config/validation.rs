//! Configuration validation

use super::*;
use crate::error::{ExtrasError, Result};

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(cloudflare) = &config.cloudflare {
        validate_cloudflare_config(cloudflare)?;
    }
    if let Some(mistral) = &config.mistral {
        validate_api_key("Mistral", &mistral.api_key)?;
        validate_url("Mistral API URL", &mistral.api_url)?;
        validate_model("Mistral", &mistral.model_name)?;
        validate_http_config(&mistral.http)?;
    }
    if let Some(together) = &config.together {
        validate_api_key("Together", &together.api_key)?;
        validate_url("Together base URL", &together.base_url)?;
        validate_model("Together embedding", &together.embedding_model)?;
        validate_model("Together rerank", &together.rerank_model)?;
        validate_top_n(together.top_n)?;
        validate_http_config(&together.http)?;
    }
    if let Some(nomic) = &config.nomic {
        validate_api_key("Nomic", &nomic.api_key)?;
        validate_url("Nomic API URL", &nomic.api_url)?;
        validate_model("Nomic", &nomic.model_name)?;
        if nomic.dimensionality == Some(0) {
            return Err(ExtrasError::Config(
                "Nomic dimensionality must be greater than 0".to_string()
            ));
        }
        validate_http_config(&nomic.http)?;
    }
    if let Some(cohere) = &config.cohere {
        validate_api_key("Cohere", &cohere.api_key)?;
        validate_url("Cohere API URL", &cohere.api_url)?;
        validate_model("Cohere", &cohere.model_name)?;
        validate_top_n(cohere.top_n)?;
        validate_http_config(&cohere.http)?;
    }
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Exactly one of account id and gateway endpoint must be set
pub fn validate_cloudflare_config(config: &CloudflareConfig) -> Result<()> {
    validate_api_key("Cloudflare", &config.api_token)?;
    validate_model("Cloudflare", &config.model_name)?;

    let has_account = config.account_id.as_deref().is_some_and(|a| !a.is_empty());
    let has_gateway = config.gateway_endpoint.as_deref().is_some_and(|g| !g.is_empty());

    match (has_account, has_gateway) {
        (false, false) => {
            return Err(ExtrasError::Config(
                "Please provide either an account_id or a gateway_endpoint.".to_string()
            ));
        }
        (true, true) => {
            return Err(ExtrasError::Config(
                "Please provide either an account_id or a gateway_endpoint, not both.".to_string()
            ));
        }
        _ => {}
    }

    if config.max_batch_size == 0 {
        return Err(ExtrasError::Config(
            "Cloudflare max batch size must be greater than 0".to_string()
        ));
    }

    validate_http_config(&config.http)
}

fn validate_api_key(provider: &str, key: &Secret<String>) -> Result<()> {
    if key.expose_secret().is_empty() {
        return Err(ExtrasError::Config(format!(
            "{} API key is required",
            provider
        )));
    }
    Ok(())
}

fn validate_model(provider: &str, model: &str) -> Result<()> {
    if model.is_empty() {
        return Err(ExtrasError::Config(format!(
            "{} model name is required",
            provider
        )));
    }
    Ok(())
}

fn validate_url(name: &str, url: &str) -> Result<()> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ExtrasError::Config(format!(
            "{} must start with http:// or https://",
            name
        )));
    }
    Ok(())
}

fn validate_top_n(top_n: Option<usize>) -> Result<()> {
    if top_n == Some(0) {
        return Err(ExtrasError::Config(
            "top_n must be greater than 0 when set".to_string()
        ));
    }
    Ok(())
}

/// Validate transport settings
pub fn validate_http_config(config: &HttpConfig) -> Result<()> {
    if config.timeout_secs == 0 {
        return Err(ExtrasError::Config(
            "Timeout must be greater than 0".to_string()
        ));
    }

    if config.timeout_secs > 300 {
        return Err(ExtrasError::Config(
            "Timeout too large (max: 300 seconds)".to_string()
        ));
    }

    if config.max_retries > 10 {
        return Err(ExtrasError::Config(
            "Max retries too large (max: 10)".to_string()
        ));
    }

    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.to_lowercase().as_str()) {
        return Err(ExtrasError::Config(format!(
            "Invalid log level: {} (valid: {:?})",
            config.level, valid_levels
        )));
    }

    let valid_formats = ["json", "pretty"];
    if !valid_formats.contains(&config.format.as_str()) {
        return Err(ExtrasError::Config(format!(
            "Invalid log format: {} (valid: {:?})",
            config.format, valid_formats
        )));
    }

    Ok(())
}
