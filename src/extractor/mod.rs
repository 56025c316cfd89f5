//! Main article extraction.
//!
//! # Module Structure
//!
//! - `flags`: Relaxable filters and their relaxation order
//! - `state`: Per-pass scores, candidates, synthetic paragraphs and byline
//! - `classify`: Tree traversal deciding what is removed and what is scored
//! - `candidates`: Candidate ranking and top candidate promotion
//! - `siblings`: Gathering the top candidate's siblings into the article
//! - `pruning`: Conditional cleaning of the assembled article
//! - `pipeline`: One extraction pass, and the retry loop around it
//!
//! # Usage
//!
//! ```rust
//! use antar::extractor::{grab_article, run_attempt, FilterFlags};
//! use antar::{dom, Options};
//!
//! let doc = dom::parse("<article><p>Some article text, long enough to be scored.</p></article>");
//!
//! // A single pass with every filter on
//! let attempt = run_attempt(&doc, FilterFlags::ALL, &Options::default());
//! assert!(attempt.text_length > 0);
//!
//! // The full retry loop
//! let grabbed = grab_article(&doc, &Options::default()).unwrap();
//! assert!(!grabbed.reached_threshold);
//! ```

pub mod candidates;
pub mod classify;
pub mod flags;
pub mod pipeline;
pub mod pruning;
pub mod siblings;
pub mod state;

pub use candidates::{TopCandidate, TopCandidates};
pub use flags::{Filter, FilterFlags};
pub use pipeline::{grab_article, run_attempt, Attempt, Grabbed};
pub use state::{NodeScore, PassState};
