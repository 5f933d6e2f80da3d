use crate::engine::{Evaluator, Fragment, Outcome};
use crate::path::FsResolver;
use std::fs;

/// A rule set in the shape people actually write: compiler-style
/// `file:line:col` references first, then bare directories, then a fallback
/// for files that do not exist yet.
const RULES: &str = r"matches [\w./~-]+:\d+(:\d+)?
matches ([\w./~-]+):(\d+)(?::(\d+))?
isfile $1
echo edit -existing $file $2 $3

matches [\w./~-]+
isdir $0
echo cd $dir

matches [\w./~-]+\.\w+
isfile $0
echo edit -existing $file

matches [\w./~-]+\.\w+
isnotexist $0
echo edit $path
";

fn project() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("src/engine")).unwrap();
    fs::write(root.path().join("src/lib.rs"), "").unwrap();
    fs::write(root.path().join("main.go"), "package main\n").unwrap();
    root
}

fn plumb(root: &tempfile::TempDir, rules: &str, input: &str, cursor: i64) -> (Outcome, String) {
    let fragment = Fragment::new(input, cursor).unwrap();
    let resolver = FsResolver::new(root.path());
    let mut out = Vec::new();
    let result = Evaluator::new(&fragment, &resolver).run(rules.as_bytes(), &mut out).unwrap();
    (result.outcome, String::from_utf8(out).unwrap())
}

fn abs(root: &tempfile::TempDir, rel: &str) -> String {
    root.path().join(rel).to_string_lossy().into_owned()
}

#[test]
fn go_file_end_to_end() {
    let root = project();
    let rules = "matches ^\\w+\\.go$\nisfile $0\necho open $path\n";

    let (outcome, out) = plumb(&root, rules, "main.go", 0);

    assert_eq!(outcome, Outcome::Matched { line: 1 });
    assert_eq!(out, format!("open {}\n", abs(&root, "main.go")));
}

#[test]
fn compiler_reference_under_cursor() {
    let root = project();
    let input = "error: mismatched types --> src/lib.rs:12:5 and main.go:3";

    // Cursor inside "src/lib.rs:12:5".
    let cursor = input.find("lib").unwrap() as i64;
    let (_, out) = plumb(&root, RULES, input, cursor);
    assert_eq!(out, format!("edit -existing {} 12 5\n", abs(&root, "src/lib.rs")));

    // Cursor inside "main.go:3": the earlier reference is ignored.
    let cursor = input.find("main").unwrap() as i64 + 2;
    let (_, out) = plumb(&root, RULES, input, cursor);
    assert_eq!(out, format!("edit -existing {} 3 \n", abs(&root, "main.go")));
}

#[test]
fn directory_under_cursor() {
    let root = project();
    let (outcome, out) = plumb(&root, RULES, "look in src/engine please", 10);
    assert_eq!(outcome, Outcome::Matched { line: 6 });
    assert_eq!(out, format!("cd {}\n", abs(&root, "src/engine")));
}

#[test]
fn missing_file_falls_through_to_creation() {
    let root = project();
    let (outcome, out) = plumb(&root, RULES, "todo: write src/new.rs", 14);
    assert_eq!(outcome, Outcome::Matched { line: 14 });
    assert_eq!(out, format!("edit {}\n", abs(&root, "src/new.rs")));
}

#[test]
fn parent_components_are_cleaned() {
    let root = project();
    let (_, out) = plumb(&root, RULES, "src/engine/../lib.rs", 0);
    assert_eq!(out, format!("edit -existing {}\n", abs(&root, "src/lib.rs")));
}

#[test]
fn nothing_under_cursor_is_silent() {
    let root = project();
    let (outcome, out) = plumb(&root, RULES, "   ", 1);
    assert_eq!(outcome, Outcome::Exhausted);
    assert!(out.is_empty());
}

#[test]
fn unicode_cursor_counts_characters() {
    let root = project();
    // "→ " is two characters but four bytes.
    let (_, out) = plumb(&root, "matches \\S+\necho <$0>\n", "→ main.go", 3);
    assert_eq!(out, "<main.go>\n");
}

#[test]
fn echo_before_failing_predicate_is_kept_in_order() {
    let root = project();
    let rules = "matches \\S+\necho trying $0\nisdir $0\necho unreachable\n\nmatches \\S+\nisfile $0\necho found $file\n";

    let (outcome, out) = plumb(&root, rules, "main.go", 0);

    assert_eq!(outcome, Outcome::Matched { line: 6 });
    assert_eq!(out, format!("trying main.go\nfound {}\n", abs(&root, "main.go")));
}

#[test]
fn predicates_can_use_home_shorthand_paths() {
    let root = project();
    // "~" alone expands to the current user's home directory.
    let Ok(home) = etcetera::home_dir() else {
        return;
    };
    if !home.is_dir() {
        return;
    }
    let (outcome, out) = plumb(&root, "matches ~\nisdir $0\necho $dir\n", "~", 0);
    assert_eq!(outcome, Outcome::Matched { line: 1 });
    assert_eq!(out, format!("{}\n", crate::path::normalize(&home).display()));
}
