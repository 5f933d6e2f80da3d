use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn plumb(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_kak-plumb"))
        .args(args)
        .env_remove("KAK_PLUMB_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

fn write_rules(dir: &Path, rules: &str) -> String {
    let path = dir.join("rules");
    fs::write(&path, rules).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn prints_the_absolute_path_of_a_matching_file() {
    let work = tempfile::tempdir().unwrap();
    fs::write(work.path().join("main.go"), "package main\n").unwrap();
    let rules = write_rules(work.path(), "matches ^\\w+\\.go$\nisfile $0\necho open $path\n");
    let dir = work.path().to_string_lossy().into_owned();

    let output = plumb(&["-r", &rules, "-d", &dir, "-c", "0"], "main.go");

    assert!(output.status.success());
    // The binary changes into the directory, so paths come out as getcwd reports them.
    let expected = format!("open {}\n", fs::canonicalize(work.path()).unwrap().join("main.go").display());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), expected);
}

#[test]
fn relative_rule_file_is_found_from_the_working_dir() {
    let work = tempfile::tempdir().unwrap();
    write_rules(work.path(), "matches \\w+\necho word $0\n");
    let dir = work.path().to_string_lossy().into_owned();

    let output = plumb(&["--rule-file", "rules", "--working-dir", &dir, "--cursor", "5"], "foo bar baz");

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "word bar\n");
}

#[test]
fn no_match_is_silent_and_successful() {
    let work = tempfile::tempdir().unwrap();
    let rules = write_rules(work.path(), "matches \\d+\necho $0\n");

    let output = plumb(&["-r", &rules], "no digits here");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn missing_rule_file_is_fatal() {
    let work = tempfile::tempdir().unwrap();
    let missing = work.path().join("absent").to_string_lossy().into_owned();

    let output = plumb(&["-r", &missing], "main.go");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("could not open the rule file"), "{stderr}");
}

#[test]
fn empty_input_is_fatal() {
    let work = tempfile::tempdir().unwrap();
    let rules = write_rules(work.path(), "echo hi\n");

    let output = plumb(&["-r", &rules], "");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_regex_is_fatal_after_earlier_output() {
    let work = tempfile::tempdir().unwrap();
    let rules = write_rules(work.path(), "echo before\nmatches [\n");

    let output = plumb(&["-r", &rules], "x");

    assert!(!output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "before\n");
    assert!(String::from_utf8(output.stderr).unwrap().contains("line 2"));
}

#[test]
fn explain_writes_the_trace_to_stderr_only() {
    let work = tempfile::tempdir().unwrap();
    let rules = write_rules(work.path(), "matches \\d+\necho digits\n\nmatches \\w+\necho word\n");

    let output = plumb(&["-r", &rules, "--explain", "--no-color"], "abc");

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "word\n");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no match overlaps the cursor"), "{stderr}");
    assert!(stderr.contains("rule at line 4"), "{stderr}");
}

#[test]
fn second_blank_line_stops_evaluation_silently() {
    let work = tempfile::tempdir().unwrap();
    let rules = write_rules(work.path(), "matches \\d+\necho digits\n\n\nmatches \\w+\necho word\n");

    let output = plumb(&["-r", &rules, "--explain", "--no-color"], "abc");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("empty rule at line 4"), "{stderr}");
}
