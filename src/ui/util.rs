/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Short axis label: `92000` → `"92k"`, `1250000` → `"1.25M"`.
pub(crate) fn compact_yen(val: i64) -> String {
    let abs = val.unsigned_abs();
    let sign = if val < 0 { "-" } else { "" };
    if abs >= 1_000_000 {
        let m = abs as f64 / 1_000_000.0;
        let text = format!("{m:.2}");
        let text = text.trim_end_matches('0').trim_end_matches('.');
        format!("{sign}{text}M")
    } else if abs >= 1_000 {
        format!("{sign}{}k", abs / 1_000)
    } else {
        format!("{sign}{abs}")
    }
}

/// One `•` per character typed.
pub(crate) fn mask(input: &str) -> String {
    "•".repeat(input.chars().count())
}

pub(crate) fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page - 1);
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
