//! Errors of step resolution and execution.

use std::fmt;

use derive_more::with_trait::{Display, Error, From};
use itertools::Itertools as _;

use crate::{error::Failure, feature::Keyword, pattern::CoerceError};

use super::location::Location;

/// Error of a step text matching more than one registered pattern.
///
/// Candidates are listed in registration order. Detected lazily, per
/// scenario step, at resolution time; recorded as a scenario failure, never
/// a crash.
#[derive(Clone, Debug, Error, PartialEq)]
pub struct AmbiguousMatchError {
    /// The step text that matched more than one pattern.
    pub step_text: String,

    /// Source expression and registration site of every matching
    /// definition, in registration order.
    pub possible_matches: Vec<(String, Option<Location>)>,
}

impl fmt::Display for AmbiguousMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step `{}` matches {} definitions:\n{}",
            self.step_text,
            self.possible_matches.len(),
            self.possible_matches
                .iter()
                .map(|(pattern, loc)| match loc {
                    Some(loc) => format!("  {pattern} --> {loc}"),
                    None => format!("  {pattern}"),
                })
                .join("\n"),
        )
    }
}

/// Error recorded in a `Failed` step outcome.
#[derive(Clone, Debug, Display, Error, From, PartialEq)]
pub enum StepError {
    /// The step text matched more than one registered pattern.
    #[display("ambiguous step: {_0}")]
    Ambiguous(AmbiguousMatchError),

    /// A declared parameter type failed to parse the matched text.
    #[display("bad step argument: {_0}")]
    BadArgument(CoerceError),

    /// The step body panicked.
    #[display("step panicked: {message}")]
    #[from(ignore)]
    Panic {
        /// The panic payload, rendered as text.
        #[error(not(source))]
        message: String,

        /// Panic site, when the panic hook captured one.
        location: Option<String>,
    },

    /// The step body reported a failure.
    #[display("{_0}")]
    Fail(Failure),

    /// An `And`/`But` step had no preceding step to inherit a keyword from.
    #[display("`{keyword}` step has no preceding step to inherit a keyword from")]
    #[from(ignore)]
    NoKeyword {
        /// The continuation keyword that could not be resolved.
        #[error(not(source))]
        keyword: Keyword,
    },
}
