use super::errors::ConfigError;
use super::models::Config;
use url::Url;

type Result<T> = std::result::Result<T, ConfigError>;

impl Config {
    /// Rejects settings that would fail later against the panel
    pub fn validate(&self) -> Result<()> {
        self.panel_url()?;

        if self.panel.api_key.trim().is_empty() {
            return Err(invalid(format!(
                "panel.api_key is empty (set it in the config file or {})",
                super::loader::API_KEY_ENV
            )));
        }

        if self.panel.timeout_secs == 0 {
            return Err(invalid("panel.timeout_secs must be at least 1".to_string()));
        }

        if self.sync.root.trim().is_empty() {
            return Err(invalid("sync.root is empty".to_string()));
        }

        if self.sync.accepted_eggs.is_empty() && self.sync.accepted_images.is_empty() {
            return Err(invalid(
                "no servers can match: set sync.accepted_eggs or sync.accepted_images".to_string(),
            ));
        }

        if self.sync.upload_concurrency == 0 {
            return Err(invalid("sync.upload_concurrency must be at least 1".to_string()));
        }

        if self.sync.server_parallelism == 0 {
            return Err(invalid("sync.server_parallelism must be at least 1".to_string()));
        }

        if self.sync.max_upload_attempts == 0 {
            return Err(invalid("sync.max_upload_attempts must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Parsed panel URL; only http(s) with a host is accepted
    pub fn panel_url(&self) -> Result<Url> {
        let raw = self.panel.url.trim();
        if raw.is_empty() {
            return Err(invalid("panel.url is empty".to_string()));
        }

        let url = Url::parse(raw)
            .map_err(|e| invalid(format!("panel.url '{}' is not a valid URL: {}", raw, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "panel.url must use http or https (got '{}')",
                url.scheme()
            )));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid(format!("panel.url '{}' has no host", raw)));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid(format!("panel.url '{}' must not carry a query or fragment", raw)));
        }

        Ok(url)
    }

    /// Panel URL without trailing slashes
    pub fn panel_base_url(&self) -> &str {
        self.panel.url.trim().trim_end_matches('/')
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::InvalidConfig(message)
}
