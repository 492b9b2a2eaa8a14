//! SQL line comments.

use std::fmt::Write;

/// Appends `-- text` lines. Line breaks inside `text` are flattened so
/// data cannot escape the comment.
pub(crate) fn push_comment(out: &mut String, text: &str) {
    let flattened: String = text
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r') { ' ' } else { ch })
        .collect();
    let _ = writeln!(out, "-- {flattened}");
}

pub(crate) const RULE: &str =
    "-- ============================================================================";

/// A banner: rule, title, rule.
pub(crate) fn push_banner(out: &mut String, title: &str) {
    out.push_str(RULE);
    out.push('\n');
    push_comment(out, title);
    out.push_str(RULE);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newlines_stay_inside_the_comment() {
        let mut out = String::new();
        push_comment(&mut out, "invalid date 'x\nDROP TABLE assistido;'");
        assert_eq!(out, "-- invalid date 'x DROP TABLE assistido;'\n");
    }
}
