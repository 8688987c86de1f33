//! Resource matching within one category.
//!
//! An exact name-fragment hit from the store always wins. Otherwise every
//! resource in the category is scored by how many search terms its name
//! satisfies, and the first strictly-highest positive score is selected.

use crate::model::category::Category;
use crate::model::record::Resource;
use crate::query::normalize::{normalize, token_kind, TokenKind};
use crate::repo::resource_repo::ResourceRepository;
use crate::repo::RepoResult;
use log::debug;

/// How a resource was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Name contains the whole residual query.
    Exact,
    /// Selected by term scoring with the given score.
    Scored(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMatch {
    pub resource: Resource,
    pub kind: MatchKind,
}

/// Finds the best resource of `category` for `residual`.
///
/// Returns `Ok(None)` when nothing qualifies. Store errors propagate unchanged.
pub fn match_resource<R: ResourceRepository + ?Sized>(
    repo: &R,
    category: Category,
    residual: &str,
) -> RepoResult<Option<ResourceMatch>> {
    if let Some(resource) = repo.find_by_name_fragment(category, residual)? {
        debug!(
            "event=resource_match module=matcher status=ok kind=exact category={:?}",
            category
        );
        return Ok(Some(ResourceMatch {
            resource,
            kind: MatchKind::Exact,
        }));
    }

    if residual.is_empty() {
        return Ok(None);
    }

    let terms = normalize(residual);
    let candidates = repo.list_by_category(category)?;
    let best = select_best(&candidates, &terms).map(|(resource, score)| ResourceMatch {
        resource: resource.clone(),
        kind: MatchKind::Scored(score),
    });

    debug!(
        "event=resource_match module=matcher status={} kind=scored category={:?} candidates={} terms={}",
        if best.is_some() { "ok" } else { "miss" },
        category,
        candidates.len(),
        terms.len()
    );
    Ok(best)
}

/// Returns the first resource with the strictly highest positive score.
pub fn select_best<'a>(candidates: &'a [Resource], terms: &[String]) -> Option<(&'a Resource, u32)> {
    let mut best: Option<(&Resource, u32)> = None;
    for resource in candidates {
        let score = score_name(&resource.name, terms);
        let current = best.map_or(0, |(_, top)| top);
        if score > current {
            best = Some((resource, score));
        }
    }
    best
}

/// Counts the terms satisfied by `name`; each term adds at most one point.
pub fn score_name(name: &str, terms: &[String]) -> u32 {
    let name = name.to_lowercase();
    let points = terms.iter().filter(|term| term_matches(&name, term)).count();
    u32::try_from(points).unwrap_or(u32::MAX)
}

fn term_matches(name: &str, term: &str) -> bool {
    if name.contains(term) {
        return true;
    }

    match token_kind(term) {
        TokenKind::Numeric => {
            name.contains(&format!("semester {term}"))
                || name.contains(&format!("sem {term}"))
                || name.contains(&format!("year {term}"))
                || ["rd", "nd", "st", "th"]
                    .iter()
                    .any(|suffix| name.contains(&format!("{term}{suffix} year")))
        }
        TokenKind::Ordinal(number) => {
            name.contains(number)
                || name.contains(&format!("semester {number}"))
                || name.contains(&format!("year {number}"))
        }
        TokenKind::Word => false,
    }
}
