use super::ValidationContext;
use crate::issues::{Finding, Rule, Severity};

fn leading(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}

fn trailing(text: &str) -> usize {
    text.chars().rev().take_while(|c| c.is_whitespace()).count()
}

/// Leading/trailing whitespace that differs between key and translation.
pub fn check_whitespace(ctx: &ValidationContext) -> Vec<Finding> {
    let mut findings = Vec::new();

    for entry in ctx.translated_entries() {
        let checks = [
            ("leading", leading(&entry.key), leading(&entry.translation)),
            ("trailing", trailing(&entry.key), trailing(&entry.translation)),
        ];
        for (side, expected, found) in checks {
            if expected != found {
                findings.push(
                    Finding::new(
                        Severity::Info,
                        Rule::Whitespace,
                        format!(
                            "{} whitespace differs: source has {}, translation has {}",
                            side, expected, found
                        ),
                    )
                    .with_key(&entry.key)
                    .at(ctx.entry_location(entry)),
                );
            }
        }
    }

    findings
}
