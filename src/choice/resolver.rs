//! Command Resolver: turns one typed token into exactly one option.
//!
//! ## Rules
//!
//! - A token made only of ASCII digits is an identifier. It resolves iff that
//!   number is in the table. Digits are never tried as a name prefix.
//! - Any other token is a case-insensitive prefix of option names. Exactly one
//!   match resolves; none is [`ResolveError::NoMatch`]; several are
//!   [`ResolveError::Ambiguous`]. Matches are not ranked, so `po` is rejected
//!   against `Poland` and `Portugal` even though both start with it.
//!
//! ```
//! use strategy_console::choice::resolve_among;
//!
//! let names = ["Portugal", "Poland"];
//! assert_eq!(resolve_among("PORT", &names), Ok("Portugal"));
//! assert!(resolve_among("po", &names).unwrap_err().is_ambiguous());
//! ```

use super::index::{IndexedOption, OptionId, OptionIndex};
use crate::error::ResolveError;

/// Whether `token` should be read as a numeric identifier.
fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Names among `names` that start with `token`, ignoring case.
fn prefix_matches<'a, I>(token: &str, names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = token.to_lowercase();
    names
        .into_iter()
        .filter(|name| name.to_lowercase().starts_with(&needle))
        .collect()
}

fn single<'a>(token: &str, matches: Vec<&'a str>) -> Result<&'a str, ResolveError> {
    match matches.as_slice() {
        [only] => Ok(*only),
        [] => Err(ResolveError::NoMatch {
            token: token.to_string(),
        }),
        _ => Err(ResolveError::Ambiguous {
            token: token.to_string(),
            candidates: matches.iter().map(|m| m.to_string()).collect(),
        }),
    }
}

/// Resolve `token` against the current option table.
pub fn resolve<'a>(
    token: &str,
    index: &'a OptionIndex,
) -> Result<(OptionId, &'a IndexedOption), ResolveError> {
    if is_numeric(token) {
        return token
            .parse::<i64>()
            .ok()
            .map(OptionId)
            .and_then(|id| index.get(id).map(|entry| (id, entry)))
            .ok_or_else(|| ResolveError::NoMatch {
                token: token.to_string(),
            });
    }

    let name = single(token, prefix_matches(token, index.iter().map(|(_, e)| e.name.as_str())))?;
    index
        .iter()
        .find(|(_, entry)| entry.name == name)
        .ok_or_else(|| ResolveError::NoMatch {
            token: token.to_string(),
        })
}

/// Resolve `token` as a prefix of one of `names`.
///
/// Used where there is no option table: the yes/no commit confirmation and
/// catalog names typed into debug commands.
pub fn resolve_among<'a, S: AsRef<str>>(token: &str, names: &'a [S]) -> Result<&'a str, ResolveError> {
    single(token, prefix_matches(token, names.iter().map(|n| n.as_ref())))
}
