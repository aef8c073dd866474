//! Query-string pagination.

use serde::Deserialize;

/// A limit of zero means "no limit".
pub const UNBOUNDED: u64 = 0;

const DEFAULT_PAGE: u64 = 1;

/// Raw `page` and `limit` query parameters, as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageParams {
    pub fn new(page: impl Into<String>, limit: impl Into<String>) -> Self {
        Self {
            page: Some(page.into()),
            limit: Some(limit.into()),
        }
    }
}

/// Offset and size of a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u64,
    pub limit: u64,
}

/// Turn query parameters into a skip/limit pair.
///
/// Negative values count as their absolute value. A missing, non-integer or
/// zero `page` means page 1; a missing or non-integer `limit` means
/// [`UNBOUNDED`].
pub fn get_pagination(params: &PageParams) -> Pagination {
    let page = match parse_abs(params.page.as_deref()) {
        0 => DEFAULT_PAGE,
        page => page,
    };
    let limit = parse_abs(params.limit.as_deref());

    Pagination {
        skip: (page - 1).saturating_mul(limit),
        limit,
    }
}

fn parse_abs(value: Option<&str>) -> u64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(i64::unsigned_abs)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: Option<&str>, limit: Option<&str>) -> Pagination {
        get_pagination(&PageParams {
            page: page.map(String::from),
            limit: limit.map(String::from),
        })
    }

    #[test]
    fn test_defaults_return_everything() {
        assert_eq!(page(None, None), Pagination { skip: 0, limit: 0 });
    }

    #[test]
    fn test_second_page() {
        assert_eq!(
            get_pagination(&PageParams::new("2", "10")),
            Pagination { skip: 10, limit: 10 }
        );
    }

    #[test]
    fn test_negative_values_use_absolute_value() {
        assert_eq!(page(Some("-2"), Some("5")), Pagination { skip: 5, limit: 5 });
        assert_eq!(page(Some("3"), Some("-4")), Pagination { skip: 8, limit: 4 });
    }

    #[test]
    fn test_non_numeric_falls_back_to_defaults() {
        assert_eq!(page(Some("abc"), Some("xyz")), Pagination { skip: 0, limit: 0 });
        assert_eq!(page(Some("1.5"), Some("10")), Pagination { skip: 0, limit: 10 });
    }

    #[test]
    fn test_page_zero_is_first_page() {
        assert_eq!(page(Some("0"), Some("10")), Pagination { skip: 0, limit: 10 });
    }

    #[test]
    fn test_page_without_limit_skips_nothing() {
        assert_eq!(page(Some("7"), None), Pagination { skip: 0, limit: UNBOUNDED });
    }

    #[test]
    fn test_huge_values_saturate() {
        let p = page(Some("9223372036854775807"), Some("9223372036854775807"));
        assert_eq!(p.skip, u64::MAX);
    }
}
