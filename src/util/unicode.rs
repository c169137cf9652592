use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells <= 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Remove the last grapheme cluster (backspace in a text field)
pub fn pop_grapheme(s: &mut String) {
    if let Some((idx, _)) = s.grapheme_indices(true).next_back() {
        s.truncate(idx);
    }
}

/// Greedy wrap into at most `max_lines` lines of `width` cells; the last
/// line is truncated with `…` when text remains.
pub fn wrap_to_width(s: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_w = 0;
    let graphemes: Vec<&str> = s.graphemes(true).collect();
    for (i, g) in graphemes.iter().enumerate() {
        let gw = display_width(g);
        if current_w + gw > width {
            if lines.len() + 1 == max_lines {
                let rest: String = graphemes[i..].concat();
                lines.push(truncate_to_width(&format!("{current}{rest}"), width));
                return lines;
            }
            lines.push(std::mem::take(&mut current));
            current_w = 0;
        }
        current.push_str(g);
        current_w += gw;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
