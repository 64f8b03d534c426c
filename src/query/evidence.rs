//! Evidence search: free-text relevance ranking with an optional geo filter.

use std::collections::HashSet;

use crate::error::ServiceError;
use crate::models::{
    EvidenceItem, EvidenceKind, EvidenceSearchRequest, EvidenceSearchResponse, GeoFilter,
    NearbyTrial,
};

const KEYWORD_WEIGHT: u32 = 2;
const TEXT_WEIGHT: u32 = 1;

/// Lower-cased alphanumeric tokens of at least two characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() > 1)
        .map(str::to_lowercase)
        .collect()
}

/// Relevance of `item` for the given search terms.
pub fn score(item: &EvidenceItem, terms: &HashSet<String>) -> u32 {
    let keywords: HashSet<String> = item.keywords.iter().flat_map(|k| tokenize(k)).collect();
    let text: HashSet<String> = tokenize(&item.title)
        .into_iter()
        .chain(tokenize(&item.summary))
        .collect();

    terms
        .iter()
        .map(|term| {
            let mut points = 0;
            if keywords.contains(term) {
                points += KEYWORD_WEIGHT;
            }
            if text.contains(term) {
                points += TEXT_WEIGHT;
            }
            points
        })
        .sum()
}

pub fn validate_geo(geo: &GeoFilter) -> Result<(), ServiceError> {
    if !geo.radius_km.is_finite() || geo.radius_km < 0.0 {
        return Err(ServiceError::invalid_field(
            "geo.radius_km",
            "must be a non-negative number",
        ));
    }
    Ok(())
}

/// Catalogue entries passing the geo filter and matching at least one term,
/// paired with their score. With no terms every entry matches with score 0.
pub fn matching<'a>(
    catalogue: &'a [EvidenceItem],
    terms: &'a HashSet<String>,
    geo: Option<GeoFilter>,
) -> impl Iterator<Item = (u32, &'a EvidenceItem)> + 'a {
    catalogue
        .iter()
        .filter(move |item| geo.map_or(true, |geo| item.within(&geo)))
        .map(move |item| (score(item, terms), item))
        .filter(move |(points, _)| terms.is_empty() || *points > 0)
}

/// Rank the catalogue against a search request.
///
/// Ties keep catalogue order.
pub fn search(
    catalogue: &[EvidenceItem],
    request: &EvidenceSearchRequest,
    max_nearby_trials: usize,
) -> Result<EvidenceSearchResponse, ServiceError> {
    if let Some(geo) = &request.geo {
        validate_geo(geo)?;
    }

    let terms: HashSet<String> = tokenize(&request.search_text()).into_iter().collect();

    let mut ranked: Vec<(u32, &EvidenceItem)> = matching(catalogue, &terms, request.geo).collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    let items: Vec<EvidenceItem> = ranked.into_iter().map(|(_, item)| item.clone()).collect();

    let ids_of = |kind: EvidenceKind| -> Vec<String> {
        items
            .iter()
            .filter(|item| item.kind == kind)
            .map(|item| item.id.clone())
            .collect()
    };
    let guideline_ids = ids_of(EvidenceKind::Guideline);
    let rct_ids = ids_of(EvidenceKind::Rct);

    let nearby_trials = items
        .iter()
        .filter(|item| item.kind == EvidenceKind::Trial)
        .filter_map(|item| {
            item.distance_km.map(|distance_km| NearbyTrial {
                id: item.id.clone(),
                name: item.title.clone(),
                distance_km,
                eligibility_summary: item.summary.clone(),
            })
        })
        .take(max_nearby_trials)
        .collect();

    Ok(EvidenceSearchResponse {
        items,
        guideline_ids,
        rct_ids,
        nearby_trials,
    })
}
