//! Placeholder expansion for `echo` and predicate arguments.
//!
//! | placeholder   | expands to                                      |
//! |---------------|-------------------------------------------------|
//! | `$$`          | a literal `$`                                   |
//! | `$N`          | capture group `N` of the last match, or nothing |
//! | `$target`     | the current (narrowed) target                   |
//! | `$fulltarget` | the whole fragment                              |
//! | `$file`       | last path accepted by `isfile`                  |
//! | `$dir`        | last path accepted by `isdir`                   |
//! | `$path`       | last path examined by any predicate             |
//!
//! Anything else after a `$` is left untouched.

use super::state::MatchState;
use regex::Captures;

/// Expand every placeholder in `template` against `state`.
pub fn format(template: &str, state: &MatchState<'_>) -> String {
    let placeholder = crate::regex!(r"\$(\d+|file|dir|path|target|fulltarget|\$)");

    placeholder
        .replace_all(template, |caps: &Captures<'_>| -> String {
            let token = caps.get(1).map_or("", |m| m.as_str());
            match token {
                "$" => "$".to_string(),
                "file" => state.file().to_string(),
                "dir" => state.dir().to_string(),
                "path" => state.path().to_string(),
                "target" => state.target().to_string(),
                "fulltarget" => state.full_target().to_string(),
                digits => {
                    // Indices too large for usize cannot name a group either.
                    digits.parse::<usize>().ok().and_then(|n| state.group(n)).unwrap_or_default().to_string()
                }
            }
        })
        .into_owned()
}
