//! Markdown renderer implementation.
//!
//! Extracted text carries no structure beyond paragraph breaks, so headings
//! are guessed per sentence: a short sentence that looks like a title becomes
//! a `##` heading, everything else is packed into paragraphs.

use crate::model::DocumentMetadata;

/// Sentences shorter than this may be promoted to headings.
const MAX_HEADING_CHARS: usize = 50;

/// A paragraph is emitted once its buffer grows past this length.
const PARAGRAPH_FLUSH_CHARS: usize = 200;

/// Render extracted text as Markdown.
pub fn to_markdown(text: &str, metadata: Option<&DocumentMetadata>) -> String {
    let mut output = String::new();

    if let Some(meta) = metadata {
        if let Some(ref title) = meta.title {
            output.push_str(&format!("# {}\n\n", title));
        }
        if let Some(ref author) = meta.author {
            output.push_str(&format!("**Author:** {}\n\n", author));
        }
    }

    let mut paragraph = String::new();
    for sentence in split_sentences(text) {
        if looks_like_heading(sentence) {
            flush_paragraph(&mut output, &mut paragraph);
            output.push_str(&format!("## {}\n\n", sentence));
            continue;
        }

        if !paragraph.is_empty() {
            paragraph.push(' ');
        }
        paragraph.push_str(sentence);
        if paragraph.chars().count() > PARAGRAPH_FLUSH_CHARS {
            flush_paragraph(&mut output, &mut paragraph);
        }
    }
    flush_paragraph(&mut output, &mut paragraph);

    output.trim_end().to_string()
}

fn flush_paragraph(output: &mut String, paragraph: &mut String) {
    let text = paragraph.trim();
    if !text.is_empty() {
        output.push_str(text);
        output.push_str("\n\n");
    }
    paragraph.clear();
}

/// Split text after `.`, `!` or `?` when followed by whitespace.
///
/// The punctuation stays with its sentence; empty pieces are dropped.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let Some(&(next_i, next)) = chars.peek() else {
            break;
        };
        if next.is_whitespace() {
            sentences.push(&text[start..next_i]);
            start = next_i;
        }
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Short, starts with an uppercase letter, and has another uppercase letter later.
fn looks_like_heading(sentence: &str) -> bool {
    if sentence.chars().count() >= MAX_HEADING_CHARS {
        return false;
    }
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.any(char::is_uppercase),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("One. Two! Three?  Four 3.5 stays.");
        assert_eq!(sentences, vec!["One.", "Two!", "Three?", "Four 3.5 stays."]);
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_heading_heuristic() {
        assert!(looks_like_heading("Quarterly Results"));
        assert!(!looks_like_heading("Quarterly results"));
        assert!(!looks_like_heading("quarterly Results"));
        assert!(!looks_like_heading(&format!("A {}", "B".repeat(60))));
    }

    #[test]
    fn test_title_and_author_header() {
        let meta = DocumentMetadata {
            title: Some("Report".to_string()),
            author: Some("Jane Roe".to_string()),
            ..Default::default()
        };
        let md = to_markdown("just some text here.", Some(&meta));
        assert_eq!(md, "# Report\n\n**Author:** Jane Roe\n\njust some text here.");
    }

    #[test]
    fn test_heading_then_flushed_paragraph() {
        let heading = "Annual Report For The Company.";
        assert_eq!(heading.len(), 30);
        let body = format!("{}.", "word ".repeat(50).trim_end());
        assert!(body.len() > 200);

        let md = to_markdown(&format!("{} {}", heading, body), None);
        let blocks: Vec<_> = md.split("\n\n").collect();
        assert_eq!(blocks, vec![format!("## {}", heading), body]);
    }

    #[test]
    fn test_short_sentences_accumulate() {
        let md = to_markdown("first one. second one. third one.", None);
        assert_eq!(md, "first one. second one. third one.");
    }

    #[test]
    fn test_heading_flushes_pending_paragraph() {
        let md = to_markdown("some intro text. Next Section. more text.", None);
        assert_eq!(md, "some intro text.\n\n## Next Section.\n\nmore text.");
    }
}
