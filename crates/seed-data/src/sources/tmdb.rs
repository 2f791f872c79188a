//! TMDB (The Movie Database) v3 client for popular movies and their credits.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::TmdbConfig;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Fetch error {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// A movie as listed by the popular feed.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogMovie {
    pub id: i64,
    pub title: Option<String>,
    pub original_title: Option<String>,
}

impl CatalogMovie {
    /// Display title, falling back to the original-language title.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.original_title.as_deref())
    }
}

/// One page of the popular feed.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<CatalogMovie>,
    pub total_pages: Option<u32>,
}

impl CatalogPage {
    /// True when `current` is the last page the feed reports.
    pub fn is_last(&self, current: u32) -> bool {
        match self.total_pages {
            Some(total) if total > 0 => current >= total,
            _ => true,
        }
    }
}

/// A credited cast member.
#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub id: i64,
    pub name: Option<String>,
    pub popularity: Option<f64>,
    pub gender: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    #[serde(default)]
    cast: Vec<CastMember>,
}

/// Read access to a paginated movie catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches one page of popular movies (1-based).
    async fn fetch_page(&self, page: u32) -> Result<CatalogPage, CatalogError>;

    /// Fetches the credited cast of a movie, in billing order.
    async fn fetch_credits(&self, movie_id: i64) -> Result<Vec<CastMember>, CatalogError>;
}

/// HTTP client for the TMDB v3 API.
pub struct TmdbClient {
    client: Client,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// GETs `path` with the key and language attached and decodes the JSON body.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        extra: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!("GET {url}");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .query(extra)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Status { status, body });
        }

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    async fn fetch_page(&self, page: u32) -> Result<CatalogPage, CatalogError> {
        self.get_json("/movie/popular", &[("page", page.to_string())])
            .await
    }

    async fn fetch_credits(&self, movie_id: i64) -> Result<Vec<CastMember>, CatalogError> {
        let credits: CreditsResponse = self
            .get_json(&format!("/movie/{movie_id}/credits"), &[])
            .await?;
        Ok(credits.cast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TmdbClient {
        TmdbClient::new(TmdbConfig::new("test-key").with_base_url(server.uri()))
    }

    #[tokio::test]
    async fn test_fetch_page_success() {
        let mock_server = MockServer::start().await;

        let response_body = r#"{
            "page": 2,
            "results": [
                {"id": 550, "title": "Fight Club", "original_title": "Fight Club"},
                {"id": 680, "original_title": "Pulp Fiction"}
            ],
            "total_pages": 7,
            "total_results": 140
        }"#;

        Mock::given(method("GET"))
            .and(path("/movie/popular"))
            .and(query_param("api_key", "test-key"))
            .and(query_param("language", "en-US"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(response_body))
            .mount(&mock_server)
            .await;

        let page = client_for(&mock_server).fetch_page(2).await.unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, Some(7));
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].display_title(), Some("Fight Club"));
        assert_eq!(page.results[1].display_title(), Some("Pulp Fiction"));
        assert!(!page.is_last(2));
        assert!(page.is_last(7));
    }

    #[tokio::test]
    async fn test_fetch_page_error_includes_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/movie/popular"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"status_message":"Invalid API key"}"#),
            )
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).fetch_page(1).await.unwrap_err();

        match err {
            CatalogError::Status { status, body } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_credits_keeps_billing_order() {
        let mock_server = MockServer::start().await;

        let response_body = r#"{
            "id": 550,
            "cast": [
                {"id": 819, "name": "Edward Norton", "popularity": 26.1, "gender": 2, "order": 0},
                {"id": 287, "name": "Brad Pitt", "popularity": 50.3, "gender": 2, "order": 1},
                {"id": 1283, "name": "Helena Bonham Carter", "order": 2}
            ],
            "crew": []
        }"#;

        Mock::given(method("GET"))
            .and(path("/movie/550/credits"))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(response_body))
            .mount(&mock_server)
            .await;

        let cast = client_for(&mock_server).fetch_credits(550).await.unwrap();

        let ids: Vec<i64> = cast.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![819, 287, 1283]);
        assert_eq!(cast[1].name.as_deref(), Some("Brad Pitt"));
        assert_eq!(cast[2].popularity, None);
    }

    #[tokio::test]
    async fn test_fetch_credits_missing_cast_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/movie/42/credits"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": 42}"#))
            .mount(&mock_server)
            .await;

        let cast = client_for(&mock_server).fetch_credits(42).await.unwrap();
        assert!(cast.is_empty());
    }

    #[test]
    fn test_page_without_total_is_last() {
        let page: CatalogPage = serde_json::from_str(r#"{"page": 1, "results": []}"#).unwrap();
        assert!(page.is_last(1));
    }
}
