//! Core HTTP client for GitHub API

use chrono::Local;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use super::{
    config::ClientConfig,
    error::{ClientError, Result, http_status_to_error},
};
use crate::{
    domain::{ProfileDto, RepositoryDto},
    pagination::FetchRequest,
    result::FetchTarget,
};

/// Pure HTTP client for GitHub API
#[derive(Debug)]
pub struct GithubApi {
    client: Client,
    config: ClientConfig,
}

impl GithubApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = Self::build_client(&config)?;

        Ok(Self { client, config })
    }

    /// Get a user profile
    #[instrument(skip(self))]
    pub async fn get_profile(&self, username: &str) -> Result<ProfileDto> {
        let url = self.endpoint(&["users", username])?;
        let profile: ProfileDto = self.get_json(url, FetchTarget::Profile).await?;
        debug!(login = %profile.login, "Successfully fetched profile");
        Ok(profile)
    }

    /// Get one page of a user's public repositories
    #[instrument(skip(self), fields(username = %request.username, page = request.page, per_page = %request.page_size))]
    pub async fn get_repositories(&self, request: &FetchRequest) -> Result<Vec<RepositoryDto>> {
        let mut url = self.endpoint(&["users", &request.username, "repos"])?;
        url.query_pairs_mut()
            .append_pair("page", &request.page.to_string())
            .append_pair("per_page", &request.page_size.to_string());

        let repositories: Vec<RepositoryDto> =
            self.get_json(url, FetchTarget::Repositories).await?;
        debug!(
            repository_count = repositories.len(),
            "Successfully fetched repositories"
        );
        Ok(repositories)
    }

    /// Get current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn build_client(config: &ClientConfig) -> Result<Client> {
        Client::builder()
            .timeout(config.request.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ClientError::Http)
    }

    /// Joins `segments` onto the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let base_url = &self.config.base_url;
        let mut url = Url::parse(base_url).map_err(|_| ClientError::invalid_url(base_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::invalid_url(base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Perform GET request and deserialize JSON response
    async fn get_json<T>(&self, url: Url, target: FetchTarget) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self.request(url).send().await?;
        self.handle_response(response, target).await
    }

    fn request(&self, url: Url) -> RequestBuilder {
        self.client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
    }

    /// Handle HTTP response and deserialize JSON
    async fn handle_response<T>(&self, response: Response, target: FetchTarget) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url_path = response.url().path().to_string();
        let status = response.status();
        let body = response.text().await?;

        if self.config.debug.log_responses {
            self.log_response_to_file(&url_path, &body, &self.config);
        }

        if let Some(error) = http_status_to_error(target, status) {
            debug!(status = status.as_u16(), path = %url_path, "Upstream returned failure status");
            return Err(error);
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(path = %url_path, error = %e, "Failed to parse response body");
            ClientError::json_parse(url_path, "Failed to parse response", e)
        })
    }

    /// Log HTTP response to file for debugging
    fn log_response_to_file(&self, path: &str, body: &str, config: &ClientConfig) {
        if let Some(log_dir) = &config.debug.log_directory {
            if !log_dir.exists()
                && let Err(e) = std::fs::create_dir_all(log_dir)
            {
                warn!("Failed to create log directory: {}", e);
                return;
            }

            let filename = format!(
                "{}_{}.json",
                Local::now().format("%Y-%m-%d_%H-%M-%S%.3f"),
                path.replace('/', "_")
            );

            let log_path = log_dir.join(filename);

            if let Err(e) = std::fs::write(&log_path, body) {
                warn!("Failed to write response log to {:?}: {}", log_path, e);
            } else {
                debug!("Response logged to {:?}", log_path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::*;
    use crate::pagination::PageSize;

    fn api_for(server: &MockServer) -> GithubApi {
        let config = ClientConfig::new(server.uri()).with_lookup_delay(Duration::ZERO);
        GithubApi::new(config).unwrap()
    }

    #[tokio::test]
    async fn fetches_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "octocat",
                "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
                "html_url": "https://github.com/octocat",
                "followers": 9000,
                "following": 9,
                "public_repos": 8,
                "public_gists": 8,
                "bio": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let profile = api_for(&server).get_profile("octocat").await.unwrap();

        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.public_repos, 8);
    }

    #[tokio::test]
    async fn profile_failure_statuses_collapse_to_not_found() {
        for status in [401u16, 404, 503] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/users/ghost"))
                .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                    "message": "Not Found"
                })))
                .mount(&server)
                .await;

            let err = api_for(&server).get_profile("ghost").await.unwrap_err();
            assert!(
                matches!(err, ClientError::NotFound { target: FetchTarget::Profile, .. }),
                "status {status} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = api_for(&server).get_profile("octocat").await.unwrap_err();
        assert!(matches!(err, ClientError::JsonParse { .. }));
    }

    #[tokio::test]
    async fn repositories_request_carries_page_and_per_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "hello-world", "html_url": "https://github.com/octocat/hello-world",
                 "description": "My first repository", "visibility": "public", "fork": false, "language": null},
                {"id": 2, "name": "linguist", "html_url": "https://github.com/octocat/linguist",
                 "description": null, "visibility": "public", "fork": true, "language": "Ruby"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let request = FetchRequest {
            username: "octocat".into(),
            page: 2,
            page_size: PageSize::Fifty,
        };
        let repositories = api_for(&server)
            .get_repositories(&request)
            .await
            .unwrap();

        assert_eq!(repositories.len(), 2);
        assert!(repositories[1].fork);
    }

    #[tokio::test]
    async fn repositories_server_error_collapses_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let request = FetchRequest {
            username: "octocat".into(),
            page: 1,
            page_size: PageSize::Ten,
        };
        let err = api_for(&server)
            .get_repositories(&request)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::NotFound { target: FetchTarget::Repositories, status: 500 }
        ));
    }

    #[test]
    fn username_is_encoded_as_a_single_segment() {
        let api = GithubApi::new(ClientConfig::new("https://api.github.com")).unwrap();
        let url = api.endpoint(&["users", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/users/a%20b%2Fc");
    }

    #[test]
    fn base_url_with_path_prefix_is_kept() {
        let api = GithubApi::new(ClientConfig::new("https://ghe.example.com/api/v3/")).unwrap();
        let url = api.endpoint(&["users", "octocat"]).unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/users/octocat");
    }
}
