//! Typed extraction outcome shared by every extractor.
//!
//! Extractors never panic or bubble errors for degraded pages. They report
//! how much of the page they could read:
//! - `Complete`: every field group was extracted
//! - `Partial`: a usable value, with the issues that degraded it
//! - `Failed`: nothing usable; the caller decides whether that is fatal

use super::provider::ScrapeError;

#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<T> {
    Complete(T),
    Partial { value: T, issues: Vec<ScrapeError> },
    Failed(ScrapeError),
}

impl<T> Extraction<T> {
    /// Build from a value and whatever issues were collected along the way.
    pub fn from_parts(value: T, issues: Vec<ScrapeError>) -> Self {
        if issues.is_empty() {
            Extraction::Complete(value)
        } else {
            Extraction::Partial { value, issues }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Extraction::Complete(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Extraction::Failed(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Extraction::Complete(v) | Extraction::Partial { value: v, .. } => Some(v),
            Extraction::Failed(_) => None,
        }
    }

    /// Issues that degraded this extraction (the error itself when failed).
    pub fn issues(&self) -> Vec<&ScrapeError> {
        match self {
            Extraction::Complete(_) => Vec::new(),
            Extraction::Partial { issues, .. } => issues.iter().collect(),
            Extraction::Failed(e) => vec![e],
        }
    }

    /// Split into an optional value and the owned list of issues.
    pub fn into_parts(self) -> (Option<T>, Vec<ScrapeError>) {
        match self {
            Extraction::Complete(v) => (Some(v), Vec::new()),
            Extraction::Partial { value, issues } => (Some(value), issues),
            Extraction::Failed(e) => (None, vec![e]),
        }
    }

    /// Value or `fallback` when failed, plus the issues.
    pub fn unwrap_or_else_parts(self, fallback: impl FnOnce() -> T) -> (T, Vec<ScrapeError>) {
        let (value, issues) = self.into_parts();
        (value.unwrap_or_else(fallback), issues)
    }

    pub fn into_result(self) -> Result<T, ScrapeError> {
        match self {
            Extraction::Complete(v) | Extraction::Partial { value: v, .. } => Ok(v),
            Extraction::Failed(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue() -> ScrapeError {
        ScrapeError::FetchFailure {
            url: "u".into(),
            status: 500,
        }
    }

    #[test]
    fn from_parts_without_issues_is_complete() {
        let e = Extraction::from_parts(5, Vec::new());
        assert!(e.is_complete());
        assert_eq!(e.value(), Some(&5));
    }

    #[test]
    fn from_parts_with_issues_is_partial() {
        let e = Extraction::from_parts(5, vec![issue()]);
        assert!(!e.is_complete());
        assert!(!e.is_failed());
        assert_eq!(e.issues().len(), 1);
    }

    #[test]
    fn failed_falls_back() {
        let e: Extraction<Vec<u8>> = Extraction::Failed(issue());
        assert!(e.value().is_none());
        let (value, issues) = e.unwrap_or_else_parts(Vec::new);
        assert!(value.is_empty());
        assert_eq!(issues, vec![issue()]);
    }

    #[test]
    fn into_result_keeps_partial_values() {
        let e = Extraction::from_parts("x", vec![issue()]);
        assert_eq!(e.into_result(), Ok("x"));
    }
}
