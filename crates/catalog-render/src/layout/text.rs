use crate::constants::LINE_HEIGHT_FACTOR;

const ELLIPSIS: &str = "...";

/// Greedy word wrap of `text` to lines no wider than `max_width`.
///
/// Explicit newlines start a new paragraph. A single word wider than the
/// line is broken between characters.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if measure(&candidate) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if measure(word) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, max_width, &measure);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

fn break_word(word: &str, max_width: f32, measure: &impl Fn(&str) -> f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        if measure(&piece) > max_width && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR
}

/// Lines of `line_height` that fit in `available_height`
pub fn max_lines(available_height: f32, line_height: f32) -> usize {
    if line_height <= 0.0 || available_height <= 0.0 {
        return 0;
    }
    (available_height / line_height).floor() as usize
}

/// Keep at most `limit` lines. When lines are dropped the last kept line is
/// shortened word by word until it fits with a trailing ellipsis.
pub fn clamp_lines(
    mut lines: Vec<String>,
    limit: usize,
    max_width: f32,
    measure: impl Fn(&str) -> f32,
) -> Vec<String> {
    if lines.len() <= limit {
        return lines;
    }
    lines.truncate(limit);

    if let Some(last) = lines.last_mut() {
        let mut words: Vec<&str> = last.split_whitespace().collect();
        let shortened = loop {
            let candidate = format!("{}{}", words.join(" "), ELLIPSIS);
            if words.len() <= 1 || measure(&candidate) <= max_width {
                break candidate;
            }
            words.pop();
        };
        *last = shortened;
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every character is 10 units wide
    fn mono(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    #[test]
    fn test_wrap_simple() {
        let lines = wrap_text("red roses and white lilies", 120.0, mono);
        assert_eq!(lines, vec!["red roses", "and white", "lilies"]);
        for line in &lines {
            assert!(mono(line) <= 120.0);
        }
    }

    #[test]
    fn test_wrap_keeps_paragraphs() {
        let lines = wrap_text("one\ntwo three", 1000.0, mono);
        assert_eq!(lines, vec!["one", "two three"]);
    }

    #[test]
    fn test_wrap_breaks_long_word() {
        let lines = wrap_text("chrysanthemums", 50.0, mono);
        assert_eq!(lines, vec!["chrys", "anthe", "mums"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap_text("   ", 100.0, mono).is_empty());
    }

    #[test]
    fn test_max_lines() {
        assert_eq!(max_lines(45.0, 14.0), 3);
        assert_eq!(max_lines(10.0, 14.0), 0);
        assert_eq!(max_lines(10.0, 0.0), 0);
    }

    #[test]
    fn test_clamp_adds_ellipsis() {
        let lines = vec![
            "aaa bbb".to_string(),
            "ccc ddd".to_string(),
            "eee".to_string(),
        ];
        let clamped = clamp_lines(lines, 2, 80.0, mono);
        assert_eq!(clamped, vec!["aaa bbb", "ccc..."]);
    }

    #[test]
    fn test_clamp_noop_when_fits() {
        let lines = vec!["a".to_string()];
        assert_eq!(clamp_lines(lines.clone(), 3, 80.0, mono), lines);
    }
}
