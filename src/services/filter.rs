//! Search-parameter parsing and recursive filter matching.
//!
//! Query-string keys other than the pagination keys are property names;
//! `name[sub]` keys express one level of nesting in the query string, and
//! nested filters recurse through entity edges. Matching is conjunctive:
//! an instance matches iff every filter clause succeeds.

use std::{future::Future, pin::Pin};

use indexmap::IndexMap;

use crate::{
    error::DataError,
    services::pagination::PAGINATION_KEYS,
    types::{traits::GraphStore, RawParams},
};

/// Recursion guard for nested filter trees; deeper filters fail the match.
const MAX_FILTER_DEPTH: usize = 8;

/// A filter clause value: a scalar compared against a terminal value, or a
/// nested mapping matched against a referenced instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Scalar(String),
    Nested(FilterMap),
}

/// Filter clauses keyed by property id, in caller order.
pub type FilterMap = IndexMap<i64, FilterValue>;

/// Parse raw search parameters into a filter map keyed by property id.
///
/// Pagination keys are skipped. Every remaining key must resolve to a known
/// property name, else `InvalidSearchParameter` names the offending key.
pub async fn parse_search_params(
    store: &dyn GraphStore,
    params: &RawParams,
) -> Result<FilterMap, DataError> {
    let mut filters = FilterMap::new();
    for (param, value) in params {
        if PAGINATION_KEYS.contains(&param.as_str()) {
            continue;
        }
        // One level deep nested parameters: outer[inner]=value
        if let (Some(open), Some(close)) = (param.find('['), param.find(']')) {
            if open < close {
                let outer = &param[..open];
                let inner = &param[open + 1..close];
                let outer_id = resolve_property(store, outer, param).await?;
                let inner_id = resolve_property(store, inner, param).await?;
                let slot = filters
                    .entry(outer_id)
                    .or_insert_with(|| FilterValue::Nested(FilterMap::new()));
                if !matches!(slot, FilterValue::Nested(_)) {
                    // A scalar clause for the same property was already
                    // given; the nested clause replaces it.
                    *slot = FilterValue::Nested(FilterMap::new());
                }
                let FilterValue::Nested(nested) = slot else {
                    unreachable!()
                };
                nested.insert(inner_id, FilterValue::Scalar(value.clone()));
                continue;
            }
        }
        let prop_id = resolve_property(store, param, param).await?;
        filters.insert(prop_id, FilterValue::Scalar(value.clone()));
    }
    Ok(filters)
}

async fn resolve_property(
    store: &dyn GraphStore,
    name: &str,
    raw_param: &str,
) -> Result<i64, DataError> {
    store
        .property_by_name(name)
        .await?
        .map(|property| property.id)
        .ok_or_else(|| DataError::InvalidSearchParameter(raw_param.to_string()))
}

/// Check whether an instance satisfies every filter clause.
///
/// Nested clauses resolve the entity edge for (subject, predicate) and
/// recurse into the referenced instance; scalar clauses resolve the literal
/// edge and compare the terminal value for exact equality. Any failed edge
/// or terminal lookup means "does not match", never a fatal error.
pub fn apply_filter<'a>(
    store: &'a dyn GraphStore,
    subject: i64,
    filters: &'a FilterMap,
    depth: usize,
) -> Pin<Box<dyn Future<Output = Result<bool, DataError>> + Send + 'a>> {
    Box::pin(async move {
        if depth >= MAX_FILTER_DEPTH {
            tracing::debug!(
                subject = subject,
                depth = depth,
                "Filter nesting exceeds depth limit; treating as no match"
            );
            return Ok(false);
        }
        for (predicate, clause) in filters {
            match clause {
                FilterValue::Nested(nested) => {
                    let Some(edge) = store.entity_edge_one(subject, *predicate).await?.found()
                    else {
                        return Ok(false);
                    };
                    if !apply_filter(store, edge.object, nested, depth + 1).await? {
                        return Ok(false);
                    }
                }
                FilterValue::Scalar(expected) => {
                    let Some(edge) = store.literal_edge_one(subject, *predicate).await?.found()
                    else {
                        return Ok(false);
                    };
                    let terminal = match store.terminal_by_id(edge.object).await? {
                        Some(terminal) => terminal,
                        None => return Ok(false),
                    };
                    if terminal.value.as_deref() != Some(expected.as_str()) {
                        return Ok(false);
                    }
                }
            }
        }
        Ok(true)
    })
}
