use kak_plumb::{Config, Outcome, RunResult};

/// What a piece of trace text means; each maps to one SGR sequence.
#[derive(Clone, Copy)]
enum Tone {
    Heading,
    Rule,
    Success,
    Failure,
    Muted,
    Note,
}

impl Tone {
    fn sgr(self) -> &'static str {
        match self {
            Tone::Heading => "\x1b[1;36m",
            Tone::Rule => "\x1b[34m",
            Tone::Success => "\x1b[32m",
            Tone::Failure => "\x1b[33m",
            Tone::Muted => "\x1b[2m",
            Tone::Note => "\x1b[90m",
        }
    }
}

struct Palette {
    enabled: bool,
}

impl Palette {
    fn tone(&self, tone: Tone, text: impl AsRef<str>) -> String {
        if self.enabled { format!("{}{}\x1b[0m", tone.sgr(), text.as_ref()) } else { text.as_ref().to_string() }
    }

    fn banner(&self, title: &str) -> String {
        self.tone(Tone::Note, format!("━━━ {title} ━━━"))
    }
}

/// Print the evaluation trace to stderr. Stdout is reserved for `echo` output.
pub fn print_run(config: &Config, result: &RunResult, color: bool) {
    let palette = Palette { enabled: color };
    eprintln!("\n{}", palette.tone(Tone::Heading, format!("⚙  Rules: {}", config.rule_file.display())));

    eprintln!("\n{}", palette.banner("Attempts"));
    if result.metrics.attempts.is_empty() {
        eprintln!("{}", palette.tone(Tone::Muted, "  No rule was started"));
    }
    for attempt in &result.metrics.attempts {
        let label = palette.tone(Tone::Rule, format!("line {:>4}:", attempt.line));
        let steps = palette.tone(Tone::Muted, format!("({} statement{})", attempt.executed, plural(attempt.executed)));
        match &attempt.failure {
            None => eprintln!("  {} {} {}", label, palette.tone(Tone::Success, "✓ matched"), steps),
            Some(failure) => {
                eprintln!("  {} {} {}", label, palette.tone(Tone::Muted, "✗"), steps);
                eprintln!("      {}", palette.tone(Tone::Failure, failure.to_string()));
            }
        }
    }

    eprintln!("\n{}", palette.banner("Outcome"));
    match result.outcome {
        Outcome::Matched { line } => eprintln!("  {}", palette.tone(Tone::Success, format!("rule at line {line}"))),
        Outcome::EmptyRule { line } => {
            eprintln!("  {}", palette.tone(Tone::Success, format!("empty rule at line {line}")));
            eprintln!("{}", palette.tone(Tone::Muted, "  A blank line where a rule should start always succeeds"));
        }
        Outcome::Exhausted => {
            eprintln!("{}", palette.tone(Tone::Muted, "  No rule matched"));
            eprintln!("\n{}", palette.tone(Tone::Failure, "Possible reasons:"));
            eprintln!("  • No first `matches` overlapped the cursor");
            eprintln!("  • A later `matches` did not consume the whole target");
            eprintln!("  • Path predicates did not hold in the working directory");
            eprintln!("\n{}", palette.tone(Tone::Muted, "  Tip: run with -vv to log every statement"));
        }
    }

    eprintln!("\n{}", palette.banner("Timing"));
    eprintln!(
        "  Total: {}  │  Patterns compiled: {}",
        palette.tone(Tone::Success, format!("{:?}", result.metrics.total)),
        palette.tone(Tone::Muted, result.metrics.patterns_compiled.to_string()),
    );
    eprintln!();
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
