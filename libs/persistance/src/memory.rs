use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use log::debug;
use models::{Draft, Field, Page, PageId, Reason, ValidationErrors};
use tokio::sync::RwLock;

use crate::store::{PageStore, Predicate, StoreError, WriteError};

#[derive(Debug, Default)]
struct Table {
    // kept in creation order
    pages: Vec<Page>,
    last_id: u64,
}

impl Table {
    fn url_title_taken(&self, url_title: &str, except: Option<PageId>) -> bool {
        self.pages
            .iter()
            .any(|p| p.url_title() == url_title && Some(p.id()) != except)
    }
}

/// Page store held in process memory. Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.pages.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PageStore for MemoryStore {
    async fn create(&self, draft: Draft) -> Result<Page, WriteError> {
        let fields = draft.into_fields()?;
        let mut table = self.table.write().await;
        if table.url_title_taken(&fields.url_title, None) {
            return Err(ValidationErrors::single(Field::UrlTitle, Reason::Taken).into());
        }
        table.last_id += 1;
        let page = Page::from_fields(PageId::new(table.last_id), fields, Local::now());
        debug!("created page {} at {}", page.id(), page.route());
        table.pages.push(page.clone());
        Ok(page)
    }

    async fn update(&self, id: PageId, draft: Draft) -> Result<Page, WriteError> {
        let fields = draft.into_fields()?;
        let mut table = self.table.write().await;
        let idx = table
            .pages
            .iter()
            .position(|p| p.id() == id)
            .ok_or(WriteError::NotFound(id))?;
        if table.url_title_taken(&fields.url_title, Some(id)) {
            return Err(ValidationErrors::single(Field::UrlTitle, Reason::Taken).into());
        }
        let revised = table.pages[idx].clone().revise(fields, Local::now());
        debug!("updated page {} at {}", id, revised.route());
        table.pages[idx] = revised.clone();
        Ok(revised)
    }

    async fn find_one(&self, predicate: &Predicate) -> Result<Option<Page>, StoreError> {
        let table = self.table.read().await;
        Ok(table.pages.iter().find(|p| predicate.matches(p)).cloned())
    }

    async fn find_all(&self, predicate: &Predicate) -> Result<Vec<Page>, StoreError> {
        let table = self.table.read().await;
        Ok(table
            .pages
            .iter()
            .filter(|p| predicate.matches(p))
            .cloned()
            .collect())
    }

    async fn destroy(&self, predicate: &Predicate) -> Result<usize, StoreError> {
        let mut table = self.table.write().await;
        let before = table.pages.len();
        table.pages.retain(|p| !predicate.matches(p));
        let removed = before - table.pages.len();
        debug!("destroyed {} page(s)", removed);
        Ok(removed)
    }
}
