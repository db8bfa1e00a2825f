//! Offset/size pagination as used by every listing endpoint.
//!
//! `(from, size)` convert to a zero-based page index `from / size` with page
//! length `size`; the page offset is therefore `(from / size) * size`.
//! Bounds are validated here so no call path can skip the check.

use serde_json::json;

use super::error::Error;

/// Validated pagination window.
///
/// ## Invariants
/// - `from >= 0`
/// - `size > 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    from: i64,
    size: i64,
}

impl PageRequest {
    /// Validate raw query parameters into a pagination window.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::PageRequest;
    ///
    /// let page = PageRequest::new(25, 10).expect("valid");
    /// assert_eq!(page.offset(), 20);
    /// assert_eq!(page.limit(), 10);
    /// ```
    pub fn new(from: i64, size: i64) -> Result<Self, Error> {
        if from < 0 || size <= 0 {
            return Err(Error::invalid_request("bad pagination params")
                .with_details(json!({ "from": from, "size": size })));
        }
        Ok(Self { from, size })
    }

    /// Zero-based page index.
    pub fn page_index(self) -> i64 {
        self.from / self.size
    }

    /// Number of leading records skipped before this page.
    #[allow(
        clippy::cast_sign_loss,
        reason = "fields are validated non-negative in the constructor"
    )]
    pub fn offset(self) -> usize {
        (self.page_index() * self.size) as usize
    }

    /// Maximum number of records on the page.
    #[allow(
        clippy::cast_sign_loss,
        reason = "size is validated positive in the constructor"
    )]
    pub fn limit(self) -> usize {
        self.size as usize
    }

    /// Apply the window to an already ordered collection.
    pub fn slice<T>(self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.limit())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(-1, 10)]
    #[case(0, 0)]
    #[case(0, -5)]
    fn rejects_out_of_bounds_params(#[case] from: i64, #[case] size: i64) {
        let err = PageRequest::new(from, size).expect_err("bounds rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "bad pagination params");
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(5, 10, 0)]
    #[case(10, 10, 10)]
    #[case(25, 10, 20)]
    fn offset_snaps_to_page_boundaries(#[case] from: i64, #[case] size: i64, #[case] offset: usize) {
        let page = PageRequest::new(from, size).expect("valid");
        assert_eq!(page.offset(), offset);
    }

    #[rstest]
    fn slice_applies_offset_and_limit() {
        let page = PageRequest::new(2, 2).expect("valid");
        let out = page.slice(vec![1, 2, 3, 4, 5]);
        assert_eq!(out, vec![3, 4]);
    }
}
