//! Keywords - search tags attached to an ad.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator used when keywords are sent to (and read from) the backend.
pub const KEYWORD_SEPARATOR: &str = ", ";

/// Maximum length of the joined keyword text.
pub const MAX_KEYWORDS_LENGTH: usize = 500;

/// Reasons a keyword cannot be added.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeywordError {
    #[error("Keyword cannot be empty")]
    Empty,

    #[error("Keyword '{0}' is already present")]
    Duplicate(String),

    #[error("Keywords cannot exceed {max} characters (would be {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Ordered list of keywords whose joined form stays within
/// [`MAX_KEYWORDS_LENGTH`] characters when built through [`Keywords::try_add`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keywords(Vec<String>);

impl Keywords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps keywords as-is; the result may be over the limit.
    pub fn from_vec(keywords: Vec<String>) -> Self {
        Self(keywords)
    }

    /// Splits backend keyword text on commas, dropping blanks.
    pub fn parse_csv(text: &str) -> Self {
        Self(
            text.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Keywords joined the way the backend stores them.
    pub fn joined(&self) -> String {
        self.0.join(KEYWORD_SEPARATOR)
    }

    /// Character count of [`Keywords::joined`].
    pub fn joined_len(&self) -> usize {
        self.joined().chars().count()
    }

    pub fn are_valid(&self) -> bool {
        self.joined_len() <= MAX_KEYWORDS_LENGTH
    }

    /// Adds a keyword unless it is blank, a duplicate, or would push the
    /// joined text past the limit.
    pub fn try_add(&mut self, keyword: &str) -> Result<(), KeywordError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(KeywordError::Empty);
        }
        if self.0.iter().any(|k| k.eq_ignore_ascii_case(keyword)) {
            return Err(KeywordError::Duplicate(keyword.to_string()));
        }

        let separator = if self.0.is_empty() { 0 } else { KEYWORD_SEPARATOR.len() };
        let actual = self.joined_len() + separator + keyword.chars().count();
        if actual > MAX_KEYWORDS_LENGTH {
            return Err(KeywordError::TooLong {
                max: MAX_KEYWORDS_LENGTH,
                actual,
            });
        }

        self.0.push(keyword.to_string());
        Ok(())
    }

    /// Removes a keyword, returning whether it was present.
    pub fn remove(&mut self, keyword: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|k| k != keyword);
        self.0.len() != before
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_comma_space() {
        let keywords = Keywords::from_vec(vec![
            "HDPE".to_string(),
            "recycling".to_string(),
            "food grade".to_string(),
        ]);
        assert_eq!(keywords.joined(), "HDPE, recycling, food grade");
        assert_eq!(keywords.joined_len(), 27);
        assert!(keywords.are_valid());
    }

    #[test]
    fn try_add_blocks_additions_past_the_limit() {
        let mut keywords = Keywords::new();
        for c in "abcdefghij".chars() {
            keywords.try_add(&c.to_string().repeat(48)).unwrap();
        }
        // 10 * 48 characters plus 9 separators
        assert_eq!(keywords.joined_len(), 498);
        assert!(keywords.are_valid());

        let err = keywords.try_add("k").unwrap_err();
        assert_eq!(err, KeywordError::TooLong { max: 500, actual: 501 });
        assert_eq!(keywords.len(), 10);
    }

    #[test]
    fn oversized_list_is_invalid() {
        let keywords = Keywords::from_vec(vec!["k".repeat(501)]);
        assert!(!keywords.are_valid());
    }

    #[test]
    fn try_add_rejects_blank_and_duplicate() {
        let mut keywords = Keywords::new();
        keywords.try_add("pellets").unwrap();
        assert_eq!(keywords.try_add("   "), Err(KeywordError::Empty));
        assert_eq!(
            keywords.try_add("Pellets"),
            Err(KeywordError::Duplicate("Pellets".to_string()))
        );
    }

    #[test]
    fn parse_csv_drops_blanks() {
        let keywords = Keywords::parse_csv("HDPE, ,recycling,");
        assert_eq!(keywords.as_slice(), &["HDPE".to_string(), "recycling".to_string()]);
    }

    #[test]
    fn remove_reports_presence() {
        let mut keywords = Keywords::parse_csv("a, b");
        assert!(keywords.remove("a"));
        assert!(!keywords.remove("a"));
        assert_eq!(keywords.joined(), "b");
    }
}
