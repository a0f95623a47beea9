//! High-level GitHub service operations

use std::sync::{Arc, mpsc::Sender};

use compact_str::CompactString;
use tokio::{runtime::Handle, time::sleep};
use tracing::{debug, info, instrument, warn};

use super::{
    api::GithubApi,
    error::{ClientError, Result},
};
use crate::{
    dispatcher::Dispatcher,
    event::{IntoLookupEvent, LookupEvent},
    id::Generation,
    pagination::FetchRequest,
    result::FetchTarget,
};

/// High-level service for GitHub operations
///
/// Runs API calls and reports every outcome as an event. Errors never leave
/// the service: each failure becomes a `*Failed` event carrying the collapsed
/// not-found error for its target.
#[derive(Debug, Clone)]
pub struct GithubService {
    api: Arc<GithubApi>,
    sender: Sender<LookupEvent>,
    handle: Handle,
}

impl GithubService {
    /// Create service from existing API client
    pub fn from_api(api: Arc<GithubApi>, sender: Sender<LookupEvent>) -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| {
            ClientError::config("GithubService must be created within a Tokio runtime context")
        })?;
        Ok(Self { api, sender, handle })
    }

    /// Resolve `username` to a profile and dispatch the outcome.
    ///
    /// Waits out the configured simulated latency before the request is sent.
    #[instrument(skip(self), fields(generation = %generation))]
    pub async fn lookup_profile(&self, generation: Generation, username: CompactString) {
        let delay = self.api.config().request.lookup_delay;
        if !delay.is_zero() {
            debug!(delay = ?delay, "Applying simulated lookup latency");
            sleep(delay).await;
        }

        info!(username = %username, "Fetching profile from GitHub");

        match self.api.get_profile(&username).await {
            Ok(profile) => {
                debug!(login = %profile.login, "Profile lookup succeeded");
                self.sender
                    .dispatch((generation, profile).into_lookup_event());
            },
            Err(e) => {
                warn!(error = %e, username = %username, "Profile lookup failed");
                self.sender.dispatch(LookupEvent::ProfileFailed(
                    generation,
                    FetchTarget::Profile.not_found(),
                ));
            },
        }
    }

    /// Fetch one repository page and dispatch the outcome
    #[instrument(skip(self), fields(generation = %generation, username = %request.username, page = request.page))]
    pub async fn fetch_repositories(&self, generation: Generation, request: FetchRequest) {
        match self.api.get_repositories(&request).await {
            Ok(repositories) => {
                debug!(
                    repository_count = repositories.len(),
                    page_size = %request.page_size,
                    "Repository page fetched"
                );
                self.sender
                    .dispatch((generation, request, repositories).into_lookup_event());
            },
            Err(e) => {
                warn!(error = %e, "Repository page fetch failed");
                self.sender.dispatch(LookupEvent::RepositoriesFailed(
                    generation,
                    FetchTarget::Repositories.not_found(),
                ));
            },
        }
    }

    /// Spawn an async task to look up a profile
    pub fn spawn_lookup_profile(&self, generation: Generation, username: CompactString) {
        let service = self.clone();
        self.handle.spawn(async move {
            service.lookup_profile(generation, username).await;
        });
    }

    /// Spawn an async task to fetch a repository page
    pub fn spawn_fetch_repositories(&self, generation: Generation, request: FetchRequest) {
        let service = self.clone();
        self.handle.spawn(async move {
            service.fetch_repositories(generation, request).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::mpsc,
        time::{Duration, Instant},
    };

    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;
    use crate::{client::ClientConfig, pagination::PageSize, result::LookupError};

    fn service_for(
        server: &MockServer,
        delay: Duration,
    ) -> (GithubService, mpsc::Receiver<LookupEvent>) {
        let (sender, receiver) = mpsc::channel();
        let config = ClientConfig::new(server.uri()).with_lookup_delay(delay);
        let api = Arc::new(GithubApi::new(config).unwrap());
        (GithubService::from_api(api, sender).unwrap(), receiver)
    }

    async fn mock_profile(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "octocat",
                "html_url": "https://github.com/octocat",
                "public_repos": 8
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn successful_lookup_dispatches_profile() {
        let server = MockServer::start().await;
        mock_profile(&server).await;
        let (service, receiver) = service_for(&server, Duration::ZERO);

        service
            .lookup_profile(Generation::new(7), "octocat".into())
            .await;

        match receiver.try_recv().unwrap() {
            LookupEvent::ProfileLoaded(generation, profile) => {
                assert_eq!(generation, Generation::new(7));
                assert_eq!(profile.login, "octocat");
            },
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_lookup_dispatches_profile_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/this-user-should-not-exist-xyz123"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let (service, receiver) = service_for(&server, Duration::ZERO);

        service
            .lookup_profile(Generation::new(1), "this-user-should-not-exist-xyz123".into())
            .await;

        assert!(matches!(
            receiver.try_recv().unwrap(),
            LookupEvent::ProfileFailed(_, LookupError::ProfileNotFound)
        ));
    }

    #[tokio::test]
    async fn unreachable_upstream_collapses_to_not_found() {
        let (sender, receiver) = mpsc::channel();
        // nothing listens on the discard port
        let config = ClientConfig::new("http://127.0.0.1:9").with_lookup_delay(Duration::ZERO);
        let api = Arc::new(GithubApi::new(config).unwrap());
        let service = GithubService::from_api(api, sender).unwrap();

        service
            .lookup_profile(Generation::new(1), "octocat".into())
            .await;

        assert!(matches!(
            receiver.try_recv().unwrap(),
            LookupEvent::ProfileFailed(_, LookupError::ProfileNotFound)
        ));
    }

    #[tokio::test]
    async fn lookup_waits_for_simulated_latency() {
        let server = MockServer::start().await;
        mock_profile(&server).await;
        let (service, receiver) = service_for(&server, Duration::from_millis(200));

        let started = Instant::now();
        service
            .lookup_profile(Generation::new(1), "octocat".into())
            .await;

        assert!(started.elapsed() >= Duration::from_millis(200));
        assert!(matches!(
            receiver.try_recv().unwrap(),
            LookupEvent::ProfileLoaded(_, _)
        ));
    }

    #[tokio::test]
    async fn repository_fetch_is_not_delayed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        let (service, receiver) = service_for(&server, Duration::from_secs(30));

        let request = FetchRequest {
            username: "octocat".into(),
            page: 1,
            page_size: PageSize::Ten,
        };
        let started = Instant::now();
        service
            .fetch_repositories(Generation::new(2), request.clone())
            .await;

        assert!(started.elapsed() < Duration::from_secs(30));
        match receiver.try_recv().unwrap() {
            LookupEvent::RepositoriesLoaded(generation, loaded, repositories) => {
                assert_eq!(generation, Generation::new(2));
                assert_eq!(loaded, request);
                assert!(repositories.is_empty());
            },
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn repository_server_error_dispatches_repositories_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let (service, receiver) = service_for(&server, Duration::ZERO);

        let request = FetchRequest {
            username: "octocat".into(),
            page: 1,
            page_size: PageSize::Ten,
        };
        service
            .fetch_repositories(Generation::new(3), request)
            .await;

        assert!(matches!(
            receiver.try_recv().unwrap(),
            LookupEvent::RepositoriesFailed(_, LookupError::RepositoriesNotFound)
        ));
    }
}
