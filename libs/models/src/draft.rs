use wikitext::{derive_slug, render_markdown, route_for};

use crate::{Field, Reason, Status, ValidationError, ValidationErrors};

/// Raw page fields as they come in from a form or a page file, before any rule has been checked.
///
/// The url title is never set from the outside: [`Draft::validate`] derives it from `title` on
/// every pass, so a draft that validated always carries a url title matching its title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    pub tags: Vec<String>,
    pub(crate) url_title: Option<String>,
}

/// Typed fields of a draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFields {
    pub title: String,
    pub content: String,
    pub status: Status,
    pub tags: Vec<String>,
    pub url_title: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Draft {
            title: Some(title.into()),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn url_title(&self) -> Option<&str> {
        self.url_title.as_deref()
    }

    /// `None` until a validation pass has derived the url title.
    pub fn route(&self) -> Option<String> {
        self.url_title.as_deref().map(route_for)
    }

    pub fn rendered_content(&self) -> String {
        render_markdown(self.content.as_deref().unwrap_or_default())
    }

    /// Runs the slug step and then every field rule, collecting all failures.
    pub fn validate(&mut self) -> Result<(), ValidationErrors> {
        self.run_pass().map(|_| ())
    }

    /// Validates and hands back the typed fields.
    pub fn into_fields(mut self) -> Result<PageFields, ValidationErrors> {
        let status = self.run_pass()?;
        match (self.title, self.content, self.url_title) {
            (Some(title), Some(content), Some(url_title)) => Ok(PageFields {
                title,
                content,
                status,
                tags: self.tags,
                url_title,
            }),
            // the pass already rejected missing fields
            _ => Err(ValidationErrors::single(Field::Title, Reason::Required)),
        }
    }

    fn run_pass(&mut self) -> Result<Status, ValidationErrors> {
        // slug first, so a passing draft never carries a stale url title
        self.url_title = present(&self.title).map(derive_slug);
        let mut errors = Vec::new();
        if present(&self.title).is_none() {
            errors.push(ValidationError::new(Field::Title, Reason::Required));
        }
        if present(&self.content).is_none() {
            errors.push(ValidationError::new(Field::Content, Reason::Required));
        }
        let status = match self.status.as_deref() {
            None => Status::default(),
            Some(raw) => raw.parse::<Status>().unwrap_or_else(|_| {
                errors.push(ValidationError::new(Field::Status, Reason::InvalidEnum));
                Status::default()
            }),
        };
        match ValidationErrors::from_vec(errors) {
            Some(errors) => Err(errors),
            None => Ok(status),
        }
    }
}

/// Blank strings count as missing.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
