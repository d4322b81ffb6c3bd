// Text formatters
//
// Width-aware helpers: product names and brands are mostly Cyrillic, and a
// char count is not a column count once CJK or emoji show up.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `s` to at most `max` terminal columns, ending in "…" when cut
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Group digits of an integer count with spaces: 8004 -> "8 004"
pub fn format_count(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, ch) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.insert(0, ' ');
        }
        result.insert(0, ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Кольцо", 10), "Кольцо");
    }

    #[test]
    fn long_text_is_cut_by_columns() {
        assert_eq!(truncate_to_width("Золотое кольцо", 8), "Золотое…");
        // Wide characters take two columns each
        assert_eq!(truncate_to_width("宝石宝石", 5), "宝石…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(42), "42");
        assert_eq!(format_count(8004), "8 004");
        assert_eq!(format_count(1234567), "1 234 567");
    }
}
