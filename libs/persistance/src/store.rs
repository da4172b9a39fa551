use std::ops::Not;

use async_trait::async_trait;
use models::{Draft, Page, PageId, Status, ValidationErrors};
use thiserror::Error;

/// Faults from the storage backend itself. These are handed back untouched, retrying is the
/// backend's business.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("{0}")]
    Invalid(ValidationErrors),
    #[error("could not find page {0}")]
    NotFound(PageId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationErrors> for WriteError {
    fn from(errors: ValidationErrors) -> Self {
        WriteError::Invalid(errors)
    }
}

/// Query shapes a store has to answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    All,
    Id(PageId),
    UrlTitle(String),
    Title(String),
    Content(String),
    Status(Status),
    /// exact, case sensitive tag match
    HasTag(String),
    /// at least one of the tags
    HasAnyTag(Vec<String>),
    Not(Box<Predicate>),
    And(Vec<Predicate>),
}

impl Predicate {
    pub fn matches(&self, page: &Page) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Id(id) => page.id() == *id,
            Predicate::UrlTitle(url_title) => page.url_title() == url_title,
            Predicate::Title(title) => page.title() == title,
            Predicate::Content(content) => page.content() == content,
            Predicate::Status(status) => page.status() == *status,
            Predicate::HasTag(tag) => page.has_tag(tag),
            Predicate::HasAnyTag(tags) => tags.iter().any(|t| page.has_tag(t)),
            Predicate::Not(inner) => !inner.matches(page),
            Predicate::And(all) => all.iter().all(|p| p.matches(page)),
        }
    }

    pub fn and(self, other: Predicate) -> Predicate {
        match self {
            Predicate::And(mut all) => {
                all.push(other);
                Predicate::And(all)
            }
            first => Predicate::And(vec![first, other]),
        }
    }
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        Predicate::Not(Box::new(self))
    }
}

/// Durable collection of pages.
///
/// `create` and `update` run the draft's validation pass before anything is written and reject
/// a url title that another page already owns. `find_all` returns pages in creation order.
#[async_trait]
pub trait PageStore: Send + Sync {
    async fn create(&self, draft: Draft) -> Result<Page, WriteError>;
    async fn update(&self, id: PageId, draft: Draft) -> Result<Page, WriteError>;
    async fn find_one(&self, predicate: &Predicate) -> Result<Option<Page>, StoreError>;
    async fn find_all(&self, predicate: &Predicate) -> Result<Vec<Page>, StoreError>;
    async fn destroy(&self, predicate: &Predicate) -> Result<usize, StoreError>;
}

/// `Ok(None)` is the not-found case.
pub async fn find_by_url_title<S: PageStore + ?Sized>(
    store: &S,
    url_title: &str,
) -> Result<Option<Page>, StoreError> {
    store
        .find_one(&Predicate::UrlTitle(url_title.to_owned()))
        .await
}
