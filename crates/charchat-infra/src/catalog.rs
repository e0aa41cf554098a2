//! Web source catalogs: OMDb for movies and shows, Google Books for books.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use charchat_core::catalog::SourceCatalog;
use charchat_types::error::CatalogError;

use crate::secret::{GOOGLE_BOOKS_API_KEY, OMDB_API_KEY, env_secret};

pub const OMDB_URL: &str = "https://www.omdbapi.com/";
pub const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Per-lookup timeout.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    #[serde(default)]
    title: String,
}

/// Whether an OMDb title lookup found something.
pub fn parse_omdb_response(body: &str) -> Result<bool, CatalogError> {
    let parsed: OmdbResponse =
        serde_json::from_str(body).map_err(|e| CatalogError::Response(e.to_string()))?;
    Ok(parsed.response.eq_ignore_ascii_case("true"))
}

/// Whether a Google Books volume search contains a book titled `title`.
pub fn parse_books_response(body: &str, title: &str) -> Result<bool, CatalogError> {
    let parsed: VolumesResponse =
        serde_json::from_str(body).map_err(|e| CatalogError::Response(e.to_string()))?;
    let wanted = title.trim().to_lowercase();
    Ok(parsed
        .items
        .iter()
        .any(|item| item.volume_info.title.trim().to_lowercase() == wanted))
}

/// A catalog reachable over HTTP.
///
/// Does NOT derive Debug: both variants hold an API key.
pub enum WebCatalog {
    Omdb {
        http: reqwest::Client,
        api_key: SecretString,
    },
    GoogleBooks {
        http: reqwest::Client,
        api_key: SecretString,
    },
}

impl WebCatalog {
    /// Every catalog whose API key is set in the environment.
    pub fn from_env() -> Vec<WebCatalog> {
        let http = reqwest::Client::new();
        let mut catalogs = Vec::new();
        if let Some(api_key) = env_secret(OMDB_API_KEY) {
            catalogs.push(WebCatalog::Omdb {
                http: http.clone(),
                api_key,
            });
        }
        if let Some(api_key) = env_secret(GOOGLE_BOOKS_API_KEY) {
            catalogs.push(WebCatalog::GoogleBooks { http, api_key });
        }
        catalogs
    }

    async fn fetch(request: reqwest::RequestBuilder) -> Result<String, CatalogError> {
        let response = request
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await
            .map_err(|e| CatalogError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| CatalogError::Request(e.without_url().to_string()))
    }
}

impl SourceCatalog for WebCatalog {
    fn name(&self) -> &str {
        match self {
            WebCatalog::Omdb { .. } => "omdb",
            WebCatalog::GoogleBooks { .. } => "google_books",
        }
    }

    async fn contains(&self, title: &str) -> Result<bool, CatalogError> {
        match self {
            WebCatalog::Omdb { http, api_key } => {
                let request = http
                    .get(OMDB_URL)
                    .query(&[("apikey", api_key.expose_secret()), ("t", title)]);
                parse_omdb_response(&Self::fetch(request).await?)
            }
            WebCatalog::GoogleBooks { http, api_key } => {
                let request = http
                    .get(GOOGLE_BOOKS_URL)
                    .query(&[("q", title), ("key", api_key.expose_secret())]);
                parse_books_response(&Self::fetch(request).await?, title)
            }
        }
    }
}
