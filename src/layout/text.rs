use crate::canvas::TextAlign;
use crate::font::Font;
use crate::units::Pt;

const TABSIZE: usize = 4;

/// Calculate the width of a given string of text given the font and font size.
/// Newlines are ignored; characters missing from the font are measured with the
/// replacement glyph.
pub fn width_of_text(text: &str, font: &Font, size: Pt) -> Pt {
    text.chars()
        .filter(|&ch| ch != '\n' && ch != '\r')
        .map(|ch| font.advance(ch, size))
        .sum()
}

/// Break text into lines no wider than `width`, as measured by `measure`.
///
/// Explicit newlines always start a new line, words are packed greedily, and a word that
/// is wider than `width` on its own is split between characters. Every paragraph yields
/// at least one line, so empty text still occupies a single (empty) line.
pub fn wrap_text<F>(text: &str, width: Pt, measure: F) -> Vec<String>
where
    F: Fn(&str) -> Pt,
{
    // replace tabs with spaces
    let text = text.replace('\t', &" ".repeat(TABSIZE));
    // normalize newlines
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&candidate) <= width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if measure(word) <= width {
                current = word.to_string();
            } else {
                // no break point, force character breaks
                for ch in word.chars() {
                    let mut candidate = current.clone();
                    candidate.push(ch);
                    if !current.is_empty() && measure(&candidate) > width {
                        lines.push(std::mem::take(&mut current));
                        current.push(ch);
                    } else {
                        current = candidate;
                    }
                }
            }
        }
        lines.push(current);
    }

    lines
}

/// Position the words of one wrapped line within `available` width. Returns each
/// piece of text to draw with its offset from the left edge.
///
/// Justified lines spread their words so that the line fills the whole width, except
/// for the last line of a paragraph (and lines of a single word), which are left aligned.
pub fn align_line<F>(
    line: &str,
    available: Pt,
    align: TextAlign,
    last_line: bool,
    measure: F,
) -> Vec<(String, Pt)>
where
    F: Fn(&str) -> Pt,
{
    if line.is_empty() {
        return Vec::new();
    }

    match align {
        TextAlign::Left => vec![(line.to_string(), Pt(0.0))],
        TextAlign::Right => vec![(line.to_string(), (available - measure(line)).max(Pt(0.0)))],
        TextAlign::Center => vec![(
            line.to_string(),
            ((available - measure(line)) / 2.0).max(Pt(0.0)),
        )],
        TextAlign::Justify => {
            let words: Vec<&str> = line.split_whitespace().collect();
            if last_line || words.len() < 2 {
                return vec![(line.to_string(), Pt(0.0))];
            }

            let widths: Vec<Pt> = words.iter().map(|word| measure(word)).collect();
            let words_width: Pt = widths.iter().copied().sum();
            let spring = (available - words_width) / (words.len() - 1) as f32;

            let mut x = Pt(0.0);
            words
                .into_iter()
                .zip(widths)
                .map(|(word, width)| {
                    let placed = (word.to_string(), x);
                    x += width + spring;
                    placed
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono(text: &str) -> Pt {
        Pt(text.chars().count() as f32 * 2.0)
    }

    #[test]
    fn packs_words_greedily() {
        let lines = wrap_text("the quick brown fox jumps", Pt(20.0), mono);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn honours_explicit_newlines_and_empty_text() {
        assert_eq!(wrap_text("a\n\nb", Pt(100.0), mono), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", Pt(100.0), mono), vec![""]);
        assert_eq!(wrap_text("tab\there", Pt(100.0), mono), vec!["tab here"]);
    }

    #[test]
    fn splits_words_that_are_too_long() {
        let lines = wrap_text("ab abcdefghij", Pt(8.0), mono);
        assert_eq!(lines, vec!["ab", "abcd", "efgh", "ij"]);
    }

    #[test]
    fn aligns_within_the_available_width() {
        assert_eq!(
            align_line("abc", Pt(10.0), TextAlign::Right, false, mono),
            vec![("abc".to_string(), Pt(4.0))]
        );
        assert_eq!(
            align_line("abc", Pt(10.0), TextAlign::Center, false, mono),
            vec![("abc".to_string(), Pt(2.0))]
        );
    }

    #[test]
    fn justifies_all_but_the_last_line() {
        let placed = align_line("ab cd ef", Pt(20.0), TextAlign::Justify, false, mono);
        assert_eq!(
            placed,
            vec![
                ("ab".to_string(), Pt(0.0)),
                ("cd".to_string(), Pt(8.0)),
                ("ef".to_string(), Pt(16.0)),
            ]
        );

        let last = align_line("ab cd ef", Pt(20.0), TextAlign::Justify, true, mono);
        assert_eq!(last, vec![("ab cd ef".to_string(), Pt(0.0))]);
    }
}
