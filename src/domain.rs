use chrono::{DateTime, Utc};
use compact_str::CompactString;
use itertools::Itertools;
use serde::Deserialize;

use crate::{id::RepositoryId, pagination::FetchRequest};

#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub login: CompactString,
    pub name: Option<CompactString>,
    pub avatar_url: CompactString,
    pub followers: u32,
    pub following: u32,
    pub public_repo_count: u32,
    pub public_gist_count: u32,
    pub profile_url: CompactString,
    pub bio: Option<CompactString>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Repository {
    pub id: RepositoryId,
    pub name: CompactString,
    pub url: CompactString,
    pub description: Option<CompactString>,
    pub visibility: Visibility,
    pub is_fork: bool,
    pub primary_language: Option<CompactString>,
    pub stars: u32,
}

/// One page of repositories, together with the request it answers.
#[derive(Clone, Debug, PartialEq)]
pub struct RepositoryPage {
    pub request: FetchRequest,
    repositories: Vec<Repository>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileDto {
    pub login: CompactString,
    pub name: Option<CompactString>,
    #[serde(default)]
    pub avatar_url: CompactString,
    #[serde(default)]
    pub html_url: CompactString,
    pub bio: Option<CompactString>,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub public_gists: u32,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryDto {
    pub id: RepositoryId,
    pub name: CompactString,
    pub html_url: CompactString,
    pub description: Option<CompactString>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub fork: bool,
    pub language: Option<CompactString>,
    #[serde(default)]
    pub stargazers_count: u32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Internal,
    #[serde(other)]
    Unknown,
}

impl Visibility {
    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::Private => "Private",
            Visibility::Internal => "Internal",
            Visibility::Unknown => "Unknown",
        }
    }
}

impl From<ProfileDto> for Profile {
    fn from(p: ProfileDto) -> Self {
        Self {
            login: p.login,
            name: p.name.filter(|n| !n.is_empty()),
            avatar_url: p.avatar_url,
            followers: p.followers,
            following: p.following,
            public_repo_count: p.public_repos,
            public_gist_count: p.public_gists,
            profile_url: p.html_url,
            bio: p.bio.filter(|b| !b.is_empty()),
            created_at: p.created_at,
        }
    }
}

impl From<RepositoryDto> for Repository {
    fn from(r: RepositoryDto) -> Self {
        Self {
            id: r.id,
            name: r.name,
            url: r.html_url,
            description: r.description.filter(|d| !d.is_empty()),
            visibility: r.visibility,
            is_fork: r.fork,
            primary_language: r.language,
            stars: r.stargazers_count,
        }
    }
}

impl RepositoryPage {
    /// Builds a page keeping upstream order; a repeated id keeps its first occurrence.
    pub fn new(request: FetchRequest, repositories: Vec<RepositoryDto>) -> Self {
        let repositories = repositories
            .into_iter()
            .map(Repository::from)
            .unique_by(|r| r.id)
            .collect();

        Self { request, repositories }
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    /// A full page is the only hint that more pages may exist.
    pub fn is_full(&self) -> bool {
        self.len() == self.request.page_size.get() as usize
    }

    pub fn get(&self, index: usize) -> Option<&Repository> {
        self.repositories.get(index)
    }

    /// Language names on this page with their repository counts, most used first.
    pub fn language_summary(&self) -> Vec<(CompactString, usize)> {
        self.repositories
            .iter()
            .filter_map(|r| r.primary_language.clone())
            .counts()
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageSize;

    fn repo(id: u64, name: &str, language: Option<&str>) -> RepositoryDto {
        RepositoryDto {
            id: RepositoryId::new(id),
            name: name.into(),
            html_url: format!("https://github.com/octocat/{name}").into(),
            language: language.map(Into::into),
            ..Default::default()
        }
    }

    fn request(page_size: PageSize) -> FetchRequest {
        FetchRequest { username: "octocat".into(), page: 1, page_size }
    }

    #[test]
    fn profile_dto_parses_github_payload() {
        let body = r#"{
            "login": "octocat",
            "id": 583231,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "html_url": "https://github.com/octocat",
            "name": "The Octocat",
            "bio": null,
            "public_repos": 8,
            "public_gists": 8,
            "followers": 9000,
            "following": 9,
            "created_at": "2011-01-25T18:44:36Z"
        }"#;

        let profile: Profile = serde_json::from_str::<ProfileDto>(body).unwrap().into();

        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.public_repo_count, 8);
        assert_eq!(profile.public_gist_count, 8);
        assert_eq!(profile.profile_url, "https://github.com/octocat");
        assert_eq!(profile.bio, None);
        assert!(profile.created_at.is_some());
    }

    #[test]
    fn repository_dto_defaults_missing_visibility_to_public() {
        let body = r#"{"id": 1, "name": "hello", "html_url": "u", "description": "", "fork": true, "language": "Rust"}"#;
        let repository: Repository = serde_json::from_str::<RepositoryDto>(body).unwrap().into();

        assert_eq!(repository.visibility, Visibility::Public);
        assert!(repository.is_fork);
        assert_eq!(repository.description, None);
    }

    #[test]
    fn unknown_visibility_is_tolerated() {
        let body = r#"{"id": 1, "name": "hello", "html_url": "u", "visibility": "secret"}"#;
        let repository: RepositoryDto = serde_json::from_str(body).unwrap();
        assert_eq!(repository.visibility, Visibility::Unknown);
    }

    #[test]
    fn page_drops_repeated_ids() {
        let page = RepositoryPage::new(
            request(PageSize::Ten),
            vec![repo(1, "a", None), repo(2, "b", None), repo(1, "a-again", None)],
        );

        assert_eq!(page.len(), 2);
        assert_eq!(page.repositories()[0].name, "a");
        assert_eq!(page.repositories()[1].name, "b");
    }

    #[test]
    fn page_is_full_only_at_page_size() {
        let ten: Vec<_> = (0..10).map(|i| repo(i, "r", None)).collect();
        assert!(RepositoryPage::new(request(PageSize::Ten), ten.clone()).is_full());
        assert!(!RepositoryPage::new(request(PageSize::Fifty), ten).is_full());
    }

    #[test]
    fn language_summary_orders_by_count() {
        let page = RepositoryPage::new(
            request(PageSize::Ten),
            vec![
                repo(1, "a", Some("Ruby")),
                repo(2, "b", Some("Rust")),
                repo(3, "c", Some("Rust")),
                repo(4, "d", None),
            ],
        );

        assert_eq!(
            page.language_summary(),
            vec![(CompactString::from("Rust"), 2), (CompactString::from("Ruby"), 1)]
        );
    }
}
