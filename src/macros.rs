/// Lazily compiled regex for a literal pattern known at compile time.
///
/// Rule-file patterns are user input and go through `PatternCache` instead;
/// this macro is only for the fixed grammars of the crate itself.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
