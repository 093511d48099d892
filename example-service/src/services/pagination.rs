use super::RepositoryError;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u64,
    limit: u64,
    skip: u64,
}

impl Page {
    pub fn new(number: i64, limit: i64) -> Result<Self, RepositoryError> {
        if number < 1 {
            return Err(RepositoryError::InvalidPagination(format!(
                "page must be at least 1, got {}",
                number
            )));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(RepositoryError::InvalidPagination(format!(
                "limit must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, limit
            )));
        }

        let number = number as u64;
        let limit = limit as u64;
        let skip = (number - 1).checked_mul(limit).ok_or_else(|| {
            RepositoryError::InvalidPagination(format!("page {} is out of range", number))
        })?;

        Ok(Self {
            number,
            limit,
            skip,
        })
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of documents discarded before this page: `(page - 1) * limit`.
    pub fn skip(&self) -> u64 {
        self.skip
    }
}
