//! Collection pagination engine.
//!
//! Derives a validated (page, page_size, offset) triple from raw
//! query-string parameters, validates mutual exclusivity among the three
//! pagination styles (`page`, `pageIndex`, `offset`), and constructs the
//! `hydra:view` navigation descriptor for a collection page.

use crate::{
    error::DataError,
    types::{hydra::PartialCollectionView, RawParams},
};

/// The three mutually exclusive pagination style keys, in the fixed order
/// conflicts are reported in.
const STYLE_KEYS: [&str; 3] = ["page", "pageIndex", "offset"];

/// Query keys consumed by pagination rather than filtering.
pub const PAGINATION_KEYS: [&str; 4] = ["page", "pageIndex", "limit", "offset"];

/// Validated pagination outcome: 1-based page, effective page size and
/// 0-based offset into the ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice {
    pub page: i64,
    pub page_size: i64,
    pub offset: i64,
}

/// Pre-process the pagination query parameters for a collection read.
///
/// Validates style exclusivity, derives page/offset/limit from the raw
/// values, then resolves the final page size and offset.
///
/// # Errors
///
/// - `IncompatibleParameters` when two style keys are supplied together,
///   naming the first conflicting pair in `[page, pageIndex, offset]` order.
/// - `PageNotFound` when page/offset/limit is not an integer.
/// - `OffsetOutOfRange` when the requested offset exceeds `result_length`.
pub fn preprocess_pagination_parameters(
    params: &RawParams,
    paginate: bool,
    page_size: i64,
    result_length: i64,
) -> Result<PageSlice, DataError> {
    check_style_exclusivity(params)?;

    // The branch order pageIndex -> offset -> page is contractual; do not
    // reorder it into a priority scheme.
    let (page, offset) = if let Some(raw) = params.get("pageIndex") {
        (parse_int(raw)?, None)
    } else if let Some(raw) = params.get("offset") {
        let offset = parse_int(raw)?;
        if page_size == 0 {
            return Err(DataError::PageNotFound(raw.clone()));
        }
        if offset > result_length {
            return Err(DataError::OffsetOutOfRange(offset));
        }
        (offset.div_euclid(page_size) + 1, Some(offset))
    } else {
        match params.get("page") {
            Some(raw) => (parse_int(raw)?, None),
            None => (1, None),
        }
    };

    let limit = match params.get("limit") {
        Some(raw) => Some(parse_int(raw)?),
        None => None,
    };

    let (page_size, offset) =
        calculate_page_limit_and_offset(paginate, page_size, page, result_length, offset, limit);

    Ok(PageSlice {
        page,
        page_size,
        offset,
    })
}

/// Of {page, pageIndex, offset} at most one may be present. Pairs are
/// checked in fixed order so page/pageIndex is reported before page/offset,
/// before pageIndex/offset.
fn check_style_exclusivity(params: &RawParams) -> Result<(), DataError> {
    for i in 0..STYLE_KEYS.len() {
        if !params.contains_key(STYLE_KEYS[i]) {
            continue;
        }
        for j in (i + 1)..STYLE_KEYS.len() {
            if params.contains_key(STYLE_KEYS[j]) {
                return Err(DataError::IncompatibleParameters(
                    STYLE_KEYS[i],
                    STYLE_KEYS[j],
                ));
            }
        }
    }
    Ok(())
}

fn parse_int(raw: &str) -> Result<i64, DataError> {
    raw.parse::<i64>()
        .map_err(|_| DataError::PageNotFound(raw.to_string()))
}

/// Resolve the final page size and offset.
///
/// `limit` overrides the configured page size. With pagination disabled the
/// whole result set is returned unpaginated (offset 0, limit = length).
/// With pagination enabled and no offset derived yet, the offset comes from
/// the 1-based page number.
fn calculate_page_limit_and_offset(
    paginate: bool,
    page_size: i64,
    page: i64,
    result_length: i64,
    offset: Option<i64>,
    limit: Option<i64>,
) -> (i64, i64) {
    let page_size = limit.unwrap_or(page_size);
    if paginate {
        // Extreme page numbers saturate instead of overflowing; the
        // saturated offset still fails the later page-bound check.
        let offset =
            offset.unwrap_or_else(|| page.saturating_sub(1).saturating_mul(page_size));
        (page_size, offset)
    } else {
        (result_length, 0)
    }
}

/// Last valid page number for a result set.
///
/// Evenly divisible non-empty sets use the exact quotient; everything else
/// (including the empty set, which still serves page 1) rounds up.
pub fn last_page(result_length: i64, page_size: i64) -> i64 {
    if result_length != 0 && result_length % page_size == 0 {
        result_length / page_size
    } else {
        result_length.div_euclid(page_size) + 1
    }
}

/// Recreate the collection IRI with all non-pagination query parameters, in
/// the original caller-supplied key order. The returned IRI always ends in
/// `?` or `&` so a pagination parameter can be appended directly.
pub fn recreate_iri(api_name: &str, collection_path: &str, params: &RawParams) -> String {
    let mut iri = format!("/{}/{}?", api_name, collection_path);
    for (key, value) in params {
        // page, pageIndex and offset are re-derived per navigation link
        if STYLE_KEYS.contains(&key.as_str()) {
            continue;
        }
        iri.push_str(&format!("{}={}&", key, value));
    }
    iri
}

/// Navigation parameter for the view links: `offset` wins over `pageIndex`
/// wins over `page`; absent all three, links use `page`.
pub fn navigation_param(params: &RawParams) -> &'static str {
    if params.contains_key("offset") {
        "offset"
    } else if params.contains_key("pageIndex") {
        "pageIndex"
    } else {
        "page"
    }
}

/// Build the `hydra:PartialCollectionView` for a collection page.
///
/// Offset style navigates by item offset; page styles navigate by 1-based
/// page number. `last` is only meaningful for the page styles.
pub fn build_view(
    paginate_param: &str,
    iri: &str,
    result_length: i64,
    page_size: i64,
    offset: i64,
    page: i64,
    last: i64,
) -> PartialCollectionView {
    if paginate_param == "offset" {
        let previous = (offset > page_size)
            .then(|| format!("{}{}={}", iri, paginate_param, offset - page_size));
        let next = (offset < result_length - page_size)
            .then(|| format!("{}{}={}", iri, paginate_param, offset + page_size));
        PartialCollectionView {
            id: format!("{}{}={}", iri, paginate_param, offset),
            type_: PartialCollectionView::TYPE.to_string(),
            first: format!("{}{}=0", iri, paginate_param),
            last: format!("{}{}={}", iri, paginate_param, result_length - page_size),
            previous,
            next,
        }
    } else {
        let previous =
            (page != 1).then(|| format!("{}{}={}", iri, paginate_param, page - 1));
        let next = (page != last).then(|| format!("{}{}={}", iri, paginate_param, page + 1));
        PartialCollectionView {
            id: format!("{}{}={}", iri, paginate_param, page),
            type_: PartialCollectionView::TYPE.to_string(),
            first: format!("{}{}=1", iri, paginate_param),
            last: format!("{}{}={}", iri, paginate_param, last),
            previous,
            next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn params(pairs: &[(&str, &str)]) -> RawParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<IndexMap<_, _>>()
    }

    #[test]
    fn style_pairs_conflict_in_fixed_order() {
        let cases = [
            (params(&[("page", "1"), ("pageIndex", "2")]), ("page", "pageIndex")),
            (params(&[("offset", "0"), ("page", "1")]), ("page", "offset")),
            (params(&[("pageIndex", "2"), ("offset", "5")]), ("pageIndex", "offset")),
            // All three present: page/pageIndex is the first pair found
            (
                params(&[("offset", "5"), ("pageIndex", "2"), ("page", "1")]),
                ("page", "pageIndex"),
            ),
        ];
        for (raw, expected) in cases {
            match preprocess_pagination_parameters(&raw, true, 10, 100) {
                Err(DataError::IncompatibleParameters(a, b)) => assert_eq!((a, b), expected),
                other => panic!("expected IncompatibleParameters, got {:?}", other),
            }
        }
    }

    #[test]
    fn offset_derives_page() {
        for (offset, expected_page) in [(0, 1), (9, 1), (10, 2), (25, 3), (100, 11)] {
            let raw = params(&[("offset", &offset.to_string())]);
            let slice = preprocess_pagination_parameters(&raw, true, 10, 100).unwrap();
            assert_eq!(slice.page, expected_page, "offset {}", offset);
            assert_eq!(slice.offset, offset);
            assert_eq!(slice.page_size, 10);
        }
    }

    #[test]
    fn offset_past_result_length_is_out_of_range() {
        let raw = params(&[("offset", "101")]);
        match preprocess_pagination_parameters(&raw, true, 10, 100) {
            Err(DataError::OffsetOutOfRange(101)) => {}
            other => panic!("expected OffsetOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn non_integer_values_are_page_not_found() {
        for key in ["page", "pageIndex", "offset", "limit"] {
            let raw = params(&[(key, "abc")]);
            match preprocess_pagination_parameters(&raw, true, 10, 100) {
                Err(DataError::PageNotFound(value)) => assert_eq!(value, "abc"),
                other => panic!("expected PageNotFound for {}, got {:?}", key, other),
            }
        }
    }

    #[test]
    fn page_number_positions_the_offset() {
        let raw = params(&[("page", "3")]);
        let slice = preprocess_pagination_parameters(&raw, true, 10, 25).unwrap();
        assert_eq!(slice.page, 3);
        assert_eq!(slice.offset, 20);
        assert_eq!(slice.page_size, 10);
    }

    #[test]
    fn page_defaults_to_one() {
        let slice = preprocess_pagination_parameters(&params(&[]), true, 10, 25).unwrap();
        assert_eq!(slice.page, 1);
        assert_eq!(slice.offset, 0);
    }

    #[test]
    fn extreme_page_numbers_saturate_instead_of_overflowing() {
        let raw = params(&[("page", &i64::MAX.to_string())]);
        let slice = preprocess_pagination_parameters(&raw, true, 10, 25).unwrap();
        assert_eq!(slice.page, i64::MAX);
        assert_eq!(slice.offset, i64::MAX);

        let raw = params(&[("page", &i64::MIN.to_string())]);
        let slice = preprocess_pagination_parameters(&raw, true, 10, 25).unwrap();
        assert_eq!(slice.page, i64::MIN);
        assert_eq!(slice.offset, i64::MIN);
    }

    #[test]
    fn limit_overrides_page_size() {
        let raw = params(&[("page", "2"), ("limit", "5")]);
        let slice = preprocess_pagination_parameters(&raw, true, 10, 25).unwrap();
        assert_eq!(slice.page_size, 5);
        assert_eq!(slice.offset, 5);
    }

    #[test]
    fn disabled_pagination_returns_everything() {
        let raw = params(&[("page", "4")]);
        let slice = preprocess_pagination_parameters(&raw, false, 10, 37).unwrap();
        assert_eq!(slice.offset, 0);
        assert_eq!(slice.page_size, 37);
    }

    #[test]
    fn last_page_rounds_up_and_serves_empty_sets() {
        assert_eq!(last_page(25, 10), 3);
        assert_eq!(last_page(30, 10), 3);
        assert_eq!(last_page(1, 10), 1);
        assert_eq!(last_page(0, 10), 1);
    }

    #[test]
    fn iri_keeps_filter_params_in_caller_order() {
        let raw = params(&[("b", "2"), ("page", "3"), ("a", "1"), ("offset", "9")]);
        assert_eq!(recreate_iri("api", "DroneCollection", &raw), "/api/DroneCollection?b=2&a=1&");
        assert_eq!(recreate_iri("api", "DroneCollection", &params(&[])), "/api/DroneCollection?");
    }

    #[test]
    fn navigation_param_precedence() {
        assert_eq!(navigation_param(&params(&[("offset", "1"), ("pageIndex", "2")])), "offset");
        assert_eq!(navigation_param(&params(&[("pageIndex", "2")])), "pageIndex");
        assert_eq!(navigation_param(&params(&[("page", "2")])), "page");
        assert_eq!(navigation_param(&params(&[])), "page");
    }

    #[test]
    fn page_style_view_symmetry() {
        // First page: no previous
        let view = build_view("page", "/api/X?", 25, 10, 0, 1, 3);
        assert_eq!(view.first, "/api/X?page=1");
        assert_eq!(view.last, "/api/X?page=3");
        assert!(view.previous.is_none());
        assert_eq!(view.next.as_deref(), Some("/api/X?page=2"));

        // Middle page: both links
        let view = build_view("page", "/api/X?", 25, 10, 10, 2, 3);
        assert_eq!(view.previous.as_deref(), Some("/api/X?page=1"));
        assert_eq!(view.next.as_deref(), Some("/api/X?page=3"));

        // Last page: no next
        let view = build_view("page", "/api/X?", 25, 10, 20, 3, 3);
        assert_eq!(view.previous.as_deref(), Some("/api/X?page=2"));
        assert!(view.next.is_none());
    }

    #[test]
    fn offset_style_view_links() {
        let view = build_view("offset", "/api/X?", 100, 10, 50, 6, 10);
        assert_eq!(view.id, "/api/X?offset=50");
        assert_eq!(view.first, "/api/X?offset=0");
        assert_eq!(view.last, "/api/X?offset=90");
        assert_eq!(view.previous.as_deref(), Some("/api/X?offset=40"));
        assert_eq!(view.next.as_deref(), Some("/api/X?offset=60"));

        // offset == page_size: previous omitted (strict inequality)
        let view = build_view("offset", "/api/X?", 100, 10, 10, 2, 10);
        assert!(view.previous.is_none());

        // tail of the set: next omitted
        let view = build_view("offset", "/api/X?", 100, 10, 90, 10, 10);
        assert!(view.next.is_none());
    }
}
