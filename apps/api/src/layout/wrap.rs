//! Greedy word wrap against measured glyph widths.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps `text` into lines no wider than `max_width_pt` at `size_pt`.
///
/// Hard newlines start a new paragraph; blank paragraphs are dropped. Runs of
/// whitespace collapse to one space. A word wider than a full line is split by
/// characters so no emitted line exceeds the width (except a single glyph wider
/// than the line, which is emitted alone).
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let space_w = metrics.space_width * size_pt;
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_w = metrics.width_pt(word, size_pt);

            if word_w > max_width_pt {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = split_long_word(word, metrics, size_pt, max_width_pt);
                // The last piece stays open so following words can join it.
                let tail = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                current_width = metrics.width_pt(&tail, size_pt);
                current = tail;
                continue;
            }

            if !current.is_empty() && current_width + space_w + word_w > max_width_pt {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

fn split_long_word(
    word: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;

    for c in word.chars() {
        let mut buf = [0u8; 4];
        let char_w = metrics.width_pt(c.encode_utf8(&mut buf), size_pt);
        if !piece.is_empty() && width + char_w > max_width_pt {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += char_w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{get_metrics, FontWeight};

    const SIZE: f32 = 10.0;

    fn wrap(text: &str, max: f32) -> Vec<String> {
        wrap_text(text, get_metrics(FontWeight::Normal), SIZE, max)
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap("", 100.0).is_empty());
        assert!(wrap("   \n  ", 100.0).is_empty());
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(wrap("Rust  developer", 495.0), vec!["Rust developer"]);
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let metrics = get_metrics(FontWeight::Normal);
        let text = "Architected a distributed caching layer using consistent hashing, \
                    reducing p99 latency by 40% under 50k RPS peak load across regions";
        let lines = wrap(text, 200.0);
        assert!(lines.len() >= 3, "expected several lines, got {lines:?}");
        for line in &lines {
            assert!(metrics.width_pt(line, SIZE) <= 200.0, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_hard_newlines_start_new_lines() {
        assert_eq!(
            wrap("first\n\nsecond", 495.0),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn test_overlong_word_is_split_by_characters() {
        let metrics = get_metrics(FontWeight::Normal);
        let word = "x".repeat(120);
        let lines = wrap(&format!("{word} end"), 100.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(metrics.width_pt(line, SIZE) <= 100.0, "line too wide: {line}");
        }
        assert_eq!(lines.concat().replace(' ', ""), format!("{word}end"));
    }
}
