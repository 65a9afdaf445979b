use anyhow::Result;

use crate::models::ReportCategory;

/// The category selector value: the `all` sentinel or one exact category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(ReportCategory),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Result<Self> {
        if value == "all" {
            return Ok(CategoryFilter::All);
        }
        ReportCategory::parse(value).map(CategoryFilter::Only)
    }

    pub fn matches(&self, category: ReportCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }
}

/// The current (search text, category) pair driving the active filter.
/// Owned by the page; the engine only reads it on each filter pass.
#[derive(Debug, Clone)]
pub struct QueryState {
    pub text: String,
    pub category: CategoryFilter,
}

impl QueryState {
    /// The reset state: empty text, `all` categories. Filtering with this
    /// query is equivalent to no filter at all.
    pub fn cleared() -> Self {
        Self {
            text: String::new(),
            category: CategoryFilter::All,
        }
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::cleared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_all_sentinel() {
        assert_eq!(CategoryFilter::parse("all").unwrap(), CategoryFilter::All);
    }

    #[test]
    fn parses_each_category() {
        assert_eq!(
            CategoryFilter::parse("keys").unwrap(),
            CategoryFilter::Only(ReportCategory::Keys)
        );
        assert!(CategoryFilter::parse("Keys").is_err());
        assert!(CategoryFilter::parse("bicycle").is_err());
    }
}
