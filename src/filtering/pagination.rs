use crate::errors::ApiError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

// SQL backends bind OFFSET as a signed 64-bit integer
const MAX_OFFSET: u64 = i64::MAX as u64;

/// A validated page window (1-based page number)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Validate `page >= 1` and `1 <= limit <= MAX_LIMIT`, applying defaults for
    /// missing values.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ValidationFailed` (422) listing every out-of-range value.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Result<Self, ApiError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        let mut errors = Vec::new();
        if page < 1 {
            errors.push("page: Input should be greater than or equal to 1".to_string());
        }
        if limit < 1 {
            errors.push("limit: Input should be greater than or equal to 1".to_string());
        } else if limit > MAX_LIMIT {
            errors.push(format!("limit: Input should be less than or equal to {MAX_LIMIT}"));
        }

        if errors.is_empty() {
            Ok(Self { page, limit })
        } else {
            Err(ApiError::validation_failed(errors))
        }
    }

    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// `(page - 1) * limit`, saturated so it can always be bound as SQL OFFSET
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit).min(MAX_OFFSET)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}
