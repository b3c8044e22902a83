//! Minimal markdown tokenizer for API summaries.
//!
//! Gemini summaries only ever use `**bold**`, `*italic*`, and line breaks,
//! so this is a deliberate three-rule scanner, not a markdown implementation.
//! `**` binds before `*`, spans never cross a line break, and an unterminated
//! marker falls back to literal text. Lists, headings, links, escapes, and
//! nesting are all out of scope.

/// One styled run of the formatted output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
    Italic(String),
    LineBreak,
}

/// Split `input` into styled runs.
///
/// Any of `\r\n`, `\n`, `\r` becomes exactly one `LineBreak`. Text free of
/// markers comes back as plain `Text` runs with its content unchanged.
pub fn tokenize(input: &str) -> Vec<Inline> {
    let mut runs = Vec::new();
    let mut text = String::new();
    let mut i = 0;

    while i < input.len() {
        let rest = &input[i..];

        if rest.starts_with("\r\n") {
            flush(&mut runs, &mut text);
            runs.push(Inline::LineBreak);
            i += 2;
        } else if rest.starts_with('\n') || rest.starts_with('\r') {
            flush(&mut runs, &mut text);
            runs.push(Inline::LineBreak);
            i += 1;
        } else if let Some(stripped) = rest.strip_prefix("**") {
            match find_closing(stripped, "**") {
                Some(end) => {
                    flush(&mut runs, &mut text);
                    runs.push(Inline::Bold(stripped[..end].to_string()));
                    i += end + 4;
                }
                None => {
                    text.push_str("**");
                    i += 2;
                }
            }
        } else if let Some(stripped) = rest.strip_prefix('*') {
            match find_closing(stripped, "*") {
                Some(end) => {
                    flush(&mut runs, &mut text);
                    runs.push(Inline::Italic(stripped[..end].to_string()));
                    i += end + 2;
                }
                None => {
                    text.push('*');
                    i += 1;
                }
            }
        } else {
            let ch = rest.chars().next().unwrap();
            text.push(ch);
            i += ch.len_utf8();
        }
    }

    flush(&mut runs, &mut text);
    runs
}

/// Find the closing marker on the current line, lazily (nearest match)
fn find_closing(haystack: &str, marker: &str) -> Option<usize> {
    let line_end = haystack.find(['\n', '\r']).unwrap_or(haystack.len());
    haystack[..line_end].find(marker)
}

fn flush(runs: &mut Vec<Inline>, text: &mut String) {
    if !text.is_empty() {
        runs.push(Inline::Text(std::mem::take(text)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(
            tokenize("just some plain text"),
            vec![Inline::Text("just some plain text".to_string())]
        );
    }

    #[test]
    fn test_bold_run() {
        assert_eq!(
            tokenize("go to **Bob's** now"),
            vec![
                Inline::Text("go to ".to_string()),
                Inline::Bold("Bob's".to_string()),
                Inline::Text(" now".to_string()),
            ]
        );
    }

    #[test]
    fn test_italic_run() {
        assert_eq!(
            tokenize("*really* good"),
            vec![
                Inline::Italic("really".to_string()),
                Inline::Text(" good".to_string()),
            ]
        );
    }

    #[test]
    fn test_bold_binds_before_italic() {
        assert_eq!(
            tokenize("**a** *b*"),
            vec![
                Inline::Bold("a".to_string()),
                Inline::Text(" ".to_string()),
                Inline::Italic("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_every_line_break_style_is_one_break() {
        assert_eq!(
            tokenize("a\nb\r\nc\rd"),
            vec![
                Inline::Text("a".to_string()),
                Inline::LineBreak,
                Inline::Text("b".to_string()),
                Inline::LineBreak,
                Inline::Text("c".to_string()),
                Inline::LineBreak,
                Inline::Text("d".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_markers_stay_literal() {
        assert_eq!(
            tokenize("a * lone star"),
            vec![Inline::Text("a * lone star".to_string())]
        );
        assert_eq!(
            tokenize("dangling **bold"),
            vec![Inline::Text("dangling **bold".to_string())]
        );
    }

    #[test]
    fn test_spans_do_not_cross_line_breaks() {
        assert_eq!(
            tokenize("**a\nb**"),
            vec![
                Inline::Text("**a".to_string()),
                Inline::LineBreak,
                Inline::Text("b**".to_string()),
            ]
        );
    }

    #[test]
    fn test_marker_free_input_round_trips_text_content() {
        let input = "Scoops & cones\non 24th Street";
        let rebuilt: String = tokenize(input)
            .iter()
            .map(|run| match run {
                Inline::Text(t) => t.as_str(),
                Inline::LineBreak => "\n",
                Inline::Bold(_) | Inline::Italic(_) => unreachable!("no markers in input"),
            })
            .collect();
        assert_eq!(rebuilt, "Scoops & cones\non 24th Street");
    }

    #[test]
    fn test_mixed_summary() {
        assert_eq!(
            tokenize("Try **Bob's**!\nIt's *the* spot."),
            vec![
                Inline::Text("Try ".to_string()),
                Inline::Bold("Bob's".to_string()),
                Inline::Text("!".to_string()),
                Inline::LineBreak,
                Inline::Text("It's ".to_string()),
                Inline::Italic("the".to_string()),
                Inline::Text(" spot.".to_string()),
            ]
        );
    }
}
