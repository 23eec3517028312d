use oc_gateway_sparql::TriplestoreError;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout of calls to the triplestores.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read configuration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Triplestore(#[from] TriplestoreError),
}

/// The configuration of the gateway as stored in `conf.json`.
///
/// Keys that are not listed here are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Public URL of the gateway, used to build redirects.
    pub base_url: String,
    pub sparql_endpoint_index: String,
    pub sparql_endpoint_meta: String,
    /// Base URL of the IRIs of index and metadata resources.
    pub index_base_url: String,
    #[serde(default = "default_index_local_url")]
    pub index_local_url: String,
    #[serde(default = "default_meta_local_url")]
    pub meta_local_url: String,
    #[serde(default = "default_virtual_local_url")]
    pub virtual_local_url: String,
    #[serde(default)]
    pub ocdm_json_context_path: Option<String>,
    /// Directory of the HTML pages.
    #[serde(default = "default_html")]
    pub html: PathBuf,
    #[serde(default)]
    pub index_base_path: Option<String>,
    #[serde(default)]
    pub label_conf: serde_json::Value,
    #[serde(default)]
    pub tmp_dir: Option<PathBuf>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub dir_split_number: u32,
    #[serde(default, deserialize_with = "number_or_string")]
    pub file_split_number: u32,
    #[serde(default)]
    pub default_dir: String,
    /// Prefix of citation IRIs. Derived from the index URLs if absent.
    #[serde(default)]
    pub citation_base_iri: Option<String>,
    /// Directory served below `/static`.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

fn default_index_local_url() -> String {
    "index".to_owned()
}

fn default_meta_local_url() -> String {
    "meta".to_owned()
}

fn default_virtual_local_url() -> String {
    "/virtual/".to_owned()
}

fn default_html() -> PathBuf {
    PathBuf::from("html")
}

fn default_upstream_timeout_secs() -> u64 {
    DEFAULT_UPSTREAM_TIMEOUT_SECS
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(number) => Ok(number),
        NumberOrString::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl GatewayConfig {
    /// Reads the configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Applies the `BASE_URL`, `SPARQL_ENDPOINT_INDEX`, `SPARQL_ENDPOINT_META` and
    /// `INDEX_BASE_URL` variables of the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Replaces the deployment-specific URLs with the values `lookup` returns for them.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fields = [
            ("BASE_URL", &mut self.base_url),
            ("SPARQL_ENDPOINT_INDEX", &mut self.sparql_endpoint_index),
            ("SPARQL_ENDPOINT_META", &mut self.sparql_endpoint_meta),
            ("INDEX_BASE_URL", &mut self.index_base_url),
        ];
        for (name, field) in fields {
            if let Some(value) = lookup(name) {
                *field = value;
            }
        }
        self
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// The prefix that turns a citation identifier into the IRI of the citation.
    pub fn citation_base_iri(&self) -> String {
        match &self.citation_base_iri {
            Some(iri) => iri.clone(),
            None => format!(
                "{}/{}/ci/",
                self.index_base_url.trim_end_matches('/'),
                self.index_local_url.trim_matches('/')
            ),
        }
    }
}

/// Holds the configuration of a gateway server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub gateway: GatewayConfig,
    /// The IP address or DNS name that the socket binds to.
    pub bind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "base_url": "https://w3id.org/oc",
        "sparql_endpoint_index": "http://localhost:9999/sparql",
        "sparql_endpoint_meta": "http://localhost:9998/sparql",
        "index_base_url": "https://w3id.org/oc"
    }"#;

    #[test]
    fn defaults() {
        let config = GatewayConfig::from_json(MINIMAL).unwrap();
        assert_eq!(config.index_local_url, "index");
        assert_eq!(config.virtual_local_url, "/virtual/");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(60));
        assert_eq!(
            config.citation_base_iri(),
            "https://w3id.org/oc/index/ci/"
        );
    }

    #[test]
    fn split_numbers_accept_strings() {
        let config = GatewayConfig::from_json(
            r#"{
                "base_url": "https://w3id.org/oc",
                "sparql_endpoint_index": "http://localhost:9999/sparql",
                "sparql_endpoint_meta": "http://localhost:9998/sparql",
                "index_base_url": "https://w3id.org/oc",
                "dir_split_number": "10000",
                "file_split_number": 1000,
                "log_dir": "ignored"
            }"#,
        )
        .unwrap();
        assert_eq!(config.dir_split_number, 10000);
        assert_eq!(config.file_split_number, 1000);
    }

    #[test]
    fn invalid_split_number_is_rejected() {
        let result = GatewayConfig::from_json(
            r#"{
                "base_url": "https://w3id.org/oc",
                "sparql_endpoint_index": "http://localhost:9999/sparql",
                "sparql_endpoint_meta": "http://localhost:9998/sparql",
                "index_base_url": "https://w3id.org/oc",
                "dir_split_number": "many"
            }"#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn overrides_replace_urls() {
        let config = GatewayConfig::from_json(MINIMAL)
            .unwrap()
            .with_overrides(|name| match name {
                "BASE_URL" => Some("http://localhost:8080".to_owned()),
                "SPARQL_ENDPOINT_META" => Some("http://meta:8890/sparql".to_owned()),
                _ => None,
            });
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.sparql_endpoint_meta, "http://meta:8890/sparql");
        assert_eq!(config.sparql_endpoint_index, "http://localhost:9999/sparql");
    }

    #[test]
    fn missing_file_is_reported() {
        let result = GatewayConfig::from_file("/nonexistent/conf.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
