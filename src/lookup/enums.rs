use serde::Serialize;
use strum::Display;

/// Outcome recorded in the `comment` column of a lookup result.
#[derive(Debug, Display, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Exactly one interpretation of the number is valid.
    #[strum(serialize = "")]
    #[serde(rename = "")]
    Resolved,
    /// No valid interpretation, or several competing ones.
    #[strum(serialize = "Needs manual review")]
    #[serde(rename = "Needs manual review")]
    NeedsManualReview,
}
