//! Pagination policy for repository pages.
//!
//! The upstream API reports no total page count, so whether a next page
//! exists is inferred from the last fetched page (see [`NextPageRule`]).

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::domain::{Profile, RepositoryPage};

/// Allowed repository page sizes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    #[default]
    Ten,
    Fifty,
    Hundred,
}

/// How the "Next" control decides whether another page is likely.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextPageRule {
    /// Next is enabled iff the loaded page holds exactly `page_size` items.
    #[default]
    PageLength,
    /// Next is disabled when `public_repo_count / current_page == page_size`.
    /// Misfires on integer division edge cases; opt-in only.
    RepoCountDivision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_size: PageSize,
    current_page: u32,
}

/// Everything needed to issue one repository page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub username: CompactString,
    pub page: u32,
    pub page_size: PageSize,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::Fifty, PageSize::Hundred];

    pub fn get(self) -> u32 {
        match self {
            PageSize::Ten => 10,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }

    /// 10 -> 50 -> 100 -> 10
    pub fn cycle(self) -> Self {
        match self {
            PageSize::Ten => PageSize::Fifty,
            PageSize::Fifty => PageSize::Hundred,
            PageSize::Hundred => PageSize::Ten,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| format!("page size must be 10, 50 or 100, got {value}"))
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl std::str::FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid page size: {s}"))?;
        PageSize::try_from(value)
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl PaginationState {
    pub fn new(page_size: PageSize) -> Self {
        Self { page_size, current_page: 1 }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Always lands on page 1, even when `size` equals the current size.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.page_size = size;
        self.current_page = 1;
    }

    pub fn cycle_page_size(&mut self) {
        self.set_page_size(self.page_size.cycle());
    }

    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Returns false (and stays put) when already on page 1.
    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn has_next(
        &self,
        rule: NextPageRule,
        page: Option<&RepositoryPage>,
        profile: Option<&Profile>,
    ) -> bool {
        match rule {
            NextPageRule::PageLength => page.is_some_and(|p| self.is_answered_by(p) && p.is_full()),
            NextPageRule::RepoCountDivision => profile.is_some_and(|p| {
                p.public_repo_count / self.current_page != self.page_size.get()
            }),
        }
    }

    /// Whether `page` is the result for the current page and page size.
    fn is_answered_by(&self, page: &RepositoryPage) -> bool {
        page.request.page == self.current_page && page.request.page_size == self.page_size
    }

    /// Advances only when `rule` says another page is likely.
    pub fn next_page(
        &mut self,
        rule: NextPageRule,
        page: Option<&RepositoryPage>,
        profile: Option<&Profile>,
    ) -> bool {
        if !self.has_next(rule, page, profile) {
            return false;
        }
        self.current_page = self.current_page.saturating_add(1);
        true
    }
}

/// The repository request implied by `username` and `state`, if any.
///
/// The store calls this after every change to the username, page or page
/// size and dispatches the result when it differs from the last request.
pub fn derive_fetch_request(
    username: Option<&str>,
    state: &PaginationState,
) -> Option<FetchRequest> {
    username.map(|username| FetchRequest {
        username: username.into(),
        page: state.current_page,
        page_size: state.page_size,
    })
}
