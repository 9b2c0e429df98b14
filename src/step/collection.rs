//! Step collection storage and resolution.
//!
//! The [`Collection`] owns every registered [`Definition`], grouped by
//! keyword class, and resolves a scenario step's text to at most one of
//! them.

use crate::feature::StepType;

use super::{
    error::AmbiguousMatchError,
    Definition, Resolution,
};

/// Collection of step [`Definition`]s.
///
/// Definitions are stored per keyword class in registration order; that
/// order is used only as the tie-break ordering of ambiguity reports, never
/// to silently prefer one match over another.
#[derive(Debug, Default)]
pub struct Collection {
    given: Vec<Definition>,
    when: Vec<Definition>,
    then: Vec<Definition>,
}

impl Collection {
    /// Creates a new empty [`Collection`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a [`Definition`] under the given keyword class.
    pub(crate) fn insert(&mut self, ty: StepType, definition: Definition) {
        self.defs_mut(ty).push(definition);
    }

    /// Returns the number of registered definitions across all keyword
    /// classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.given.len() + self.when.len() + self.then.len()
    }

    /// Returns `true` if no definitions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves the given step text against the definitions of the given
    /// keyword class.
    ///
    /// The caller passes the resolved effective [`StepType`]: the
    /// collection itself is agnostic about `And`/`But` continuations.
    #[must_use]
    pub fn find(&self, ty: StepType, text: &str) -> Resolution<'_> {
        let mut matches = self
            .defs(ty)
            .iter()
            .filter_map(|def| def.pattern().find_match(text).map(|res| (def, res)))
            .collect::<Vec<_>>();

        match matches.len() {
            0 => Resolution::Undefined,
            1 => {
                // Instead of `.unwrap()` to avoid documenting `# Panics`.
                let Some((def, res)) = matches.pop() else {
                    unreachable!()
                };
                match res {
                    Ok(params) => Resolution::Match(def, params),
                    Err(e) => Resolution::BadArgument(e),
                }
            }
            _ => Resolution::Ambiguous(AmbiguousMatchError {
                step_text: text.to_owned(),
                possible_matches: matches
                    .into_iter()
                    .map(|(def, _)| {
                        (def.pattern().source().to_owned(), def.location())
                    })
                    .collect(),
            }),
        }
    }

    fn defs(&self, ty: StepType) -> &Vec<Definition> {
        match ty {
            StepType::Given => &self.given,
            StepType::When => &self.when,
            StepType::Then => &self.then,
        }
    }

    fn defs_mut(&mut self, ty: StepType) -> &mut Vec<Definition> {
        match ty {
            StepType::Given => &mut self.given,
            StepType::When => &mut self.when,
            StepType::Then => &mut self.then,
        }
    }
}
