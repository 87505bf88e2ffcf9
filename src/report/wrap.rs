//! Helvetica text measurement and greedy word wrapping.

/// Points per millimetre.
const PT_PER_MM: f32 = 72.0 / 25.4;

/// Advance widths (1/1000 em) of the standard Helvetica face, codes 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

const BULLET_WIDTH: u16 = 350;
const DEFAULT_WIDTH: u16 = 556;

fn glyph_width(c: char) -> u16 {
    match c {
        ' '..='~' => HELVETICA_WIDTHS[c as usize - 32],
        '\u{2022}' => BULLET_WIDTH,
        _ => DEFAULT_WIDTH,
    }
}

/// Rendered width of `text` in millimetres at `font_size` points.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c) as u32).sum();
    units as f32 / 1000.0 * font_size / PT_PER_MM
}

/// Split `text` into the longest lines that fit `max_width` millimetres.
///
/// Explicit newlines start a new line. Runs of whitespace collapse to one
/// space. A word wider than the line is broken between characters. Always
/// returns at least one line.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                push_word(&mut lines, &mut current, word, max_width, font_size);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if text_width(&candidate, font_size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                push_word(&mut lines, &mut current, word, max_width, font_size);
            }
        }
        lines.push(current);
    }

    lines
}

/// Start a fresh line with `word`, spilling character chunks of an overlong
/// word into `lines`. The last chunk stays in `current` so the next word can
/// still join it.
fn push_word(lines: &mut Vec<String>, current: &mut String, word: &str, max_width: f32, font_size: f32) {
    if text_width(word, font_size) <= max_width {
        current.push_str(word);
        return;
    }
    for c in word.chars() {
        let mut candidate = current.clone();
        candidate.push(c);
        if !current.is_empty() && text_width(&candidate, font_size) > max_width {
            lines.push(std::mem::take(current));
            current.push(c);
        } else {
            *current = candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: f32 = 10.0;

    fn words(lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .flat_map(|line| line.split_whitespace().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let narrow = text_width("Decision", 10.0);
        let wide = text_width("Decision", 20.0);
        assert!((wide - narrow * 2.0).abs() < 1e-4);
        // 10 spaces at 10pt: 2780/1000 * 10pt = 27.8pt
        assert!((text_width("          ", 10.0) - 27.8 / PT_PER_MM).abs() < 1e-4);
    }

    #[test]
    fn test_short_text_is_single_line() {
        assert_eq!(wrap_text("Stay at the current job", 170.0, SIZE), vec!["Stay at the current job"]);
    }

    #[test]
    fn test_empty_text_yields_one_empty_line() {
        assert_eq!(wrap_text("", 170.0, SIZE), vec![String::new()]);
    }

    #[test]
    fn test_long_text_wraps_and_keeps_every_word() {
        let text = "Accepting the offer assumes the startup will close its next funding round, \
                    that the equity grant vests on schedule, and that the new role offers more \
                    growth than the current one, none of which was verified before signing.";
        let lines = wrap_text(text, 60.0, SIZE);
        assert!(lines.len() > 2);
        for line in &lines {
            assert!(text_width(line, SIZE) <= 60.0, "line too wide: {line}");
        }
        let original: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        assert_eq!(words(&lines), original);
    }

    #[test]
    fn test_lines_are_maximal() {
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu";
        let lines = wrap_text(text, 40.0, SIZE);
        for pair in lines.windows(2) {
            let next_word = pair[1].split_whitespace().next().unwrap();
            let joined = format!("{} {}", pair[0], next_word);
            assert!(text_width(&joined, SIZE) > 40.0);
        }
    }

    #[test]
    fn test_wrapping_is_idempotent() {
        let text = "Sunk cost fallacy: continuing because of the money already spent on the \
                    renovation rather than on the expected value of finishing it.";
        let lines = wrap_text(text, 50.0, SIZE);
        let rewrapped: Vec<String> = lines
            .iter()
            .flat_map(|line| wrap_text(line, 50.0, SIZE))
            .collect();
        assert_eq!(rewrapped, lines);
    }

    #[test]
    fn test_overlong_word_is_split_not_dropped() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, 30.0, SIZE);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width(line, SIZE) <= 30.0);
        }
    }

    #[test]
    fn test_newlines_start_new_lines() {
        assert_eq!(wrap_text("first\nsecond", 170.0, SIZE), vec!["first", "second"]);
    }
}
