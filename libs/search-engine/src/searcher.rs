use std::collections::HashSet;

use log::debug;
use models::Page;
use persistance::{PageStore, Predicate, StoreError};

/// A page related to the query page, with the number of distinct tags they share.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub page: Page,
    pub shared_tags: usize,
}

/// Every page carrying exactly `tag`, in creation order.
pub async fn find_by_tag<S: PageStore + ?Sized>(
    store: &S,
    tag: &str,
) -> Result<Vec<Page>, StoreError> {
    store.find_all(&Predicate::HasTag(tag.to_owned())).await
}

/// Other pages sharing at least one tag with `page`, most shared tags first.
pub async fn find_similar<S: PageStore + ?Sized>(
    store: &S,
    page: &Page,
) -> Result<Vec<Page>, StoreError> {
    let matches = find_similar_scored(store, page, None).await?;
    Ok(matches.into_iter().map(|m| m.page).collect())
}

pub async fn find_similar_with_limit<S: PageStore + ?Sized>(
    store: &S,
    page: &Page,
    limit: usize,
) -> Result<Vec<Page>, StoreError> {
    let matches = find_similar_scored(store, page, Some(limit)).await?;
    Ok(matches.into_iter().map(|m| m.page).collect())
}

pub async fn find_similar_scored<S: PageStore + ?Sized>(
    store: &S,
    page: &Page,
    limit: Option<usize>,
) -> Result<Vec<Match>, StoreError> {
    let tags = page.tag_set();
    if tags.is_empty() {
        return Ok(Vec::new());
    }
    let predicate = Predicate::HasAnyTag(tags.iter().map(|t| t.to_string()).collect())
        .and(!Predicate::Id(page.id()));
    let candidates = store.find_all(&predicate).await?;
    let mut matches = candidates
        .into_iter()
        .filter_map(|other| {
            let shared_tags = shared_tag_count(&tags, &other);
            // the store only promised "any tag", the count is what decides
            (shared_tags > 0).then(|| Match {
                page: other,
                shared_tags,
            })
        })
        .collect::<Vec<Match>>();
    rank_matches(&mut matches);
    if let Some(limit) = limit {
        matches.truncate(limit);
    }
    debug!(
        "{} similar page(s) for {}",
        matches.len(),
        page.url_title()
    );
    Ok(matches)
}

fn shared_tag_count(tags: &HashSet<&str>, other: &Page) -> usize {
    other
        .tag_set()
        .iter()
        .filter(|tag| tags.contains(*tag))
        .count()
}

/// Most shared tags first, older pages first on ties.
fn rank_matches(matches: &mut [Match]) {
    matches.sort_by(|a, b| {
        b.shared_tags
            .cmp(&a.shared_tags)
            .then_with(|| a.page.id().cmp(&b.page.id()))
    });
}
