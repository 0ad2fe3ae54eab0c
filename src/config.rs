use anyhow::{Context, bail};
use reqwest::Url;
use std::env;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "math-ping-assistant";
const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Application configuration, read once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the Ollama service, without a trailing slash.
    pub ollama_url: String,
    pub ollama_model: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, applying defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid number, got '{}'", raw))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs: u64 = match lookup("OLLAMA_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().with_context(|| {
                format!("OLLAMA_TIMEOUT_SECS must be a whole number of seconds, got '{}'", raw)
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("OLLAMA_TIMEOUT_SECS must be greater than zero");
        }

        let ollama_url = lookup("OLLAMA_URL").unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
        let parsed = Url::parse(ollama_url.trim())
            .with_context(|| format!("OLLAMA_URL must be an absolute URL, got '{}'", ollama_url))?;
        if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
            bail!(
                "OLLAMA_URL must be an http(s) URL with a host, got '{}'",
                ollama_url
            );
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            ollama_url: ollama_url.trim().trim_end_matches('/').to_string(),
            ollama_model: lookup("OLLAMA_MODEL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.ollama_url)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.ollama_url, "http://localhost:11434");
        assert_eq!(config.ollama_model, "math-ping-assistant");
        assert_eq!(config.timeout, Duration::from_secs(180));
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9001"),
            ("OLLAMA_URL", "http://ollama:11434/"),
            ("OLLAMA_MODEL", "llama3"),
            ("OLLAMA_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9001");
        assert_eq!(config.generate_url(), "http://ollama:11434/api/generate");
        assert_eq!(config.ollama_model, "llama3");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "eighty")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("OLLAMA_TIMEOUT_SECS", "-1")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("OLLAMA_TIMEOUT_SECS", "0")])).is_err());
    }

    #[test]
    fn test_ollama_url_must_be_http_with_host() {
        for bad in ["localhost:11434", "ollama", "ftp://ollama:21", "http://", ""] {
            assert!(
                Config::from_lookup(lookup_from(&[("OLLAMA_URL", bad)])).is_err(),
                "accepted '{}'",
                bad
            );
        }
        let config =
            Config::from_lookup(lookup_from(&[("OLLAMA_URL", "https://ollama.internal:11434")]))
                .unwrap();
        assert_eq!(config.generate_url(), "https://ollama.internal:11434/api/generate");
    }
}
