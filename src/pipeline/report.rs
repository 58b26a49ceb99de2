//! Change report rendering.

use crate::models::Finding;

const RULE: &str = "==========================";

/// Render findings as a human readable change log.
///
/// ```text
/// Keyword detection results:
/// ==========================
/// New occurrence of the word sale on http://a.com
///
/// Link detection results:
/// ==========================
/// New link appeared on http://a.com
/// ```
pub fn render_report(findings: &[Finding]) -> String {
    let mut keyword_lines = Vec::new();
    let mut link_lines = Vec::new();

    for finding in findings {
        match finding {
            Finding::KeywordIncrease { url, word, .. } => {
                keyword_lines.push(format!("New occurrence of the word {word} on {url}"));
            }
            Finding::NewLinks { url, .. } => {
                link_lines.push(format!("New link appeared on {url}"));
            }
        }
    }

    let mut out = String::new();
    push_section(
        &mut out,
        "Keyword detection results:",
        "No new keywords detected",
        &keyword_lines,
    );
    out.push('\n');
    push_section(
        &mut out,
        "Link detection results:",
        "No new links detected",
        &link_lines,
    );
    out
}

fn push_section(out: &mut String, title: &str, empty: &str, lines: &[String]) {
    if lines.is_empty() {
        out.push_str(empty);
        out.push('\n');
        return;
    }
    out.push_str(title);
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
}
