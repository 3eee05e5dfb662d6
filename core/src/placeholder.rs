//! Positional placeholder normalization.
//!
//! Usage lines describe positional arguments with a little notation:
//! `[CONTAINER...]` for repetition and `REPOSITORY|IMAGE` for alternatives.
//! [`expand_placeholders`] reduces a raw token list to the distinct names
//! that a completion policy classifies.

use std::collections::BTreeSet;

use crate::Subcommand;

/// Expands repetition and union notation into distinct placeholder names.
///
/// The returned set is sorted; input order is not preserved.
///
/// # Examples
///
/// ```
/// use completion_gen_core::expand_placeholders;
///
/// let names = expand_placeholders(["[CONTAINER...]", "REPOSITORY|IMAGE", "IMAGE"]);
/// let names: Vec<_> = names.into_iter().collect();
/// assert_eq!(names, vec!["CONTAINER", "IMAGE", "REPOSITORY"]);
/// ```
pub fn expand_placeholders<I, S>(raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names = BTreeSet::new();
    for token in raw {
        let token = strip_repetition(token.as_ref());
        names.extend(token.split('|').map(ToOwned::to_owned));
    }
    names
}

/// Returns `INNER` for a token shaped like `[INNER...]`.
fn strip_repetition(token: &str) -> &str {
    token
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix("...]"))
        .filter(|inner| !inner.is_empty())
        .unwrap_or(token)
}

/// Runs `classify` once per expanded placeholder of `sub`, keeping the
/// non-`None` results.
///
/// A `None` result means the placeholder deliberately gets no completion.
pub fn classify_arguments<T, F>(sub: &Subcommand, mut classify: F) -> Vec<T>
where
    F: FnMut(&Subcommand, &str) -> Option<T>,
{
    expand_placeholders(&sub.arguments)
        .iter()
        .filter_map(|name| classify(sub, name))
        .collect()
}
