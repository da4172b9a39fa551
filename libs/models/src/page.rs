use std::{collections::HashSet, fmt};

use chrono::{DateTime, Local};
use wikitext::{render_markdown, route_for};

use crate::{Draft, PageFields, Status};

/// Store assigned identity. Ids only ever grow, so ordering by id is ordering by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(u64);

impl PageId {
    pub fn new(raw: u64) -> Self {
        PageId(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated, persisted page. Only a store hands these out.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    id: PageId,
    title: String,
    content: String,
    status: Status,
    tags: Vec<String>,
    url_title: String,
    created: DateTime<Local>,
    modified: Option<DateTime<Local>>,
}

impl Page {
    pub fn from_fields(id: PageId, fields: PageFields, created: DateTime<Local>) -> Self {
        Page {
            id,
            title: fields.title,
            content: fields.content,
            status: fields.status,
            tags: fields.tags,
            url_title: fields.url_title,
            created,
            modified: None,
        }
    }

    /// Replaces every user field, keeping identity and creation time.
    pub fn revise(self, fields: PageFields, modified: DateTime<Local>) -> Self {
        Page {
            modified: Some(modified),
            ..Page::from_fields(self.id, fields, self.created)
        }
    }

    /// Raw fields for an edit; feed the result back through the store to persist it.
    pub fn to_draft(&self) -> Draft {
        Draft {
            title: Some(self.title.clone()),
            content: Some(self.content.clone()),
            status: Some(self.status.as_str().to_owned()),
            tags: self.tags.clone(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn url_title(&self) -> &str {
        &self.url_title
    }

    pub fn created(&self) -> DateTime<Local> {
        self.created
    }

    pub fn modified(&self) -> Option<DateTime<Local>> {
        self.modified
    }

    pub fn route(&self) -> String {
        route_for(&self.url_title)
    }

    pub fn rendered_content(&self) -> String {
        render_markdown(&self.content)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Tags with duplicates collapsed.
    pub fn tag_set(&self) -> HashSet<&str> {
        self.tags.iter().map(String::as_str).collect()
    }
}
