//! Translation platform client

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};

use super::types::{RemoteFile, TranslationItem};
use crate::config::SyncConfig;
use crate::error::{Error, Result};

/// Read access to the translations of a project.
pub trait TranslationSource {
    /// All files of the project.
    ///
    /// # Errors
    /// Returns an error if the listing cannot be fetched.
    fn list_files(&self) -> Result<Vec<RemoteFile>>;

    /// Translation entries of one file.
    ///
    /// # Errors
    /// Returns an error if the entries cannot be fetched.
    fn file_translations(&self, file_id: u64) -> Result<Vec<TranslationItem>>;
}

/// API credentials, taken from `API_TOKEN` and `PROJECT_ID`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub project_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("project_id", &self.project_id)
            .finish()
    }
}

impl Credentials {
    pub const TOKEN_VAR: &'static str = "API_TOKEN";
    pub const PROJECT_VAR: &'static str = "PROJECT_ID";

    /// Read credentials from the environment.
    ///
    /// # Errors
    /// Returns [`Error::MissingEnv`] if either variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            token: non_empty_env(Self::TOKEN_VAR)?,
            project_id: non_empty_env(Self::PROJECT_VAR)?,
        })
    }
}

fn non_empty_env(name: &'static str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(Error::MissingEnv(name))
}

/// Blocking client for the Paratranz API.
pub struct ParatranzClient {
    http: Client,
    base_url: String,
    project_id: String,
}

impl ParatranzClient {
    /// Build a client sending the token as `Authorization` on every request.
    ///
    /// # Errors
    /// Returns an error if the token is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn new(config: &SyncConfig, credentials: &Credentials) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(&credentials.token)
            .map_err(|_| Error::InvalidCredentials("API token contains invalid header characters".to_string()))?;
        token.set_sensitive(true);
        headers.insert(AUTHORIZATION, token);
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("questloc/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            project_id: credentials.project_id.clone(),
        })
    }

    fn files_url(&self) -> String {
        format!("{}/projects/{}/files/", self.base_url, self.project_id)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {url}");
        let response = self.http.get(url).send()?.error_for_status()?;
        Ok(response.json()?)
    }
}

impl TranslationSource for ParatranzClient {
    fn list_files(&self) -> Result<Vec<RemoteFile>> {
        self.get_json(&self.files_url())
    }

    fn file_translations(&self, file_id: u64) -> Result<Vec<TranslationItem>> {
        self.get_json(&format!("{}{file_id}/translation", self.files_url()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = SyncConfig {
            api_base: "https://example.invalid/api/".to_string(),
            ..SyncConfig::default()
        };
        let credentials = Credentials {
            token: "secret".to_string(),
            project_id: "42".to_string(),
        };
        let client = ParatranzClient::new(&config, &credentials).unwrap();
        assert_eq!(client.files_url(), "https://example.invalid/api/projects/42/files/");
    }

    #[test]
    fn test_debug_hides_token() {
        let credentials = Credentials {
            token: "secret".to_string(),
            project_id: "42".to_string(),
        };
        assert!(!format!("{credentials:?}").contains("secret"));
    }
}
