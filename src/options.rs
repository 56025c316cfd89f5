//! Configuration options for article extraction.
//!
//! The `Options` struct holds the tunable constants of the extraction
//! heuristics. The defaults are the values the heuristics were calibrated
//! with; change them only with a reason.

use crate::error::{Error, Result};

/// Largest candidate ranking the selector keeps.
pub const MAX_TOP_CANDIDATES: usize = 5;

/// Farthest ancestor level that receives content score.
pub const MAX_ANCESTOR_DEPTH: usize = 3;

/// Configuration options for article extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use antar::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Accept shorter articles without retrying
/// let options = Options {
///     char_threshold: 250,
///     ..Options::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Article length, in characters, that ends the retry loop.
    ///
    /// Default: `500`
    pub char_threshold: usize,

    /// Size of the candidate ranking, at most [`MAX_TOP_CANDIDATES`].
    ///
    /// Default: `5`
    pub n_top_candidates: usize,

    /// How many ancestors receive a scored element's content score, at most
    /// [`MAX_ANCESTOR_DEPTH`].
    ///
    /// Default: `3`
    pub max_ancestor_depth: usize,

    /// Shortest element text, in characters, that gets scored.
    ///
    /// Default: `25`
    pub min_paragraph_length: usize,

    /// Share of the top candidate's score granted to a sibling with the
    /// same class.
    ///
    /// Default: `0.2`
    pub sibling_class_bonus: f64,

    /// Score ratio to the top candidate at which a runner-up counts toward
    /// promoting a shared ancestor.
    ///
    /// Default: `0.75`
    pub alternative_candidate_ratio: f64,

    /// Runners-up that must share an ancestor for it to be promoted.
    ///
    /// Default: `3`
    pub min_alternative_ancestors: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            char_threshold: 500,
            n_top_candidates: 5,
            max_ancestor_depth: 3,
            min_paragraph_length: 25,
            sibling_class_bonus: 0.2,
            alternative_candidate_ratio: 0.75,
            min_alternative_ancestors: 3,
        }
    }
}

impl Options {
    /// Reject settings the heuristics cannot work with.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOptions`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_TOP_CANDIDATES).contains(&self.n_top_candidates) {
            return Err(Error::InvalidOptions(format!(
                "n_top_candidates must be within 1..={MAX_TOP_CANDIDATES}"
            )));
        }
        if !(1..=MAX_ANCESTOR_DEPTH).contains(&self.max_ancestor_depth) {
            return Err(Error::InvalidOptions(format!(
                "max_ancestor_depth must be within 1..={MAX_ANCESTOR_DEPTH}"
            )));
        }
        if !(0.0..=1.0).contains(&self.sibling_class_bonus) {
            return Err(Error::InvalidOptions("sibling_class_bonus must be within 0..=1".into()));
        }
        if !(self.alternative_candidate_ratio > 0.0 && self.alternative_candidate_ratio <= 1.0) {
            return Err(Error::InvalidOptions(
                "alternative_candidate_ratio must be within (0, 1]".into(),
            ));
        }
        Ok(())
    }
}
