//! Presentational helpers shared by every view.

use bookverse_core::{Book, StarStyle, Theme, star_string};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{ListItem, ListState};
use unicode_width::UnicodeWidthStr;

pub(crate) fn accent_color(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Blue,
        Theme::Dark => Color::Yellow,
    }
}

pub(crate) fn highlight_style(theme: Theme) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(accent_color(theme))
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn muted() -> Style {
    Style::default().fg(Color::Gray)
}

pub(crate) fn star_span(rating: f32, style: StarStyle) -> Span<'static> {
    Span::styled(star_string(rating, style), Style::default().fg(Color::Yellow))
}

/// Bold key label followed by its action, for footers and help lines.
pub(crate) fn hints_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (idx, (key, action)) in hints.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key.to_string(), bold()));
        spans.push(Span::raw(format!(" {action}")));
    }
    Line::from(spans)
}

/// Tab strip with the active tab highlighted.
pub(crate) fn tab_line(titles: &[String], active: usize, theme: Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, title) in titles.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" | ", muted()));
        }
        let style = if idx == active {
            highlight_style(theme)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {title} "), style));
    }
    Line::from(spans)
}

pub(crate) fn option_chip(label: &str, selected: bool, row_selected: bool) -> Span<'static> {
    let base = if selected && row_selected {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if row_selected {
        Style::default().add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::Gray)
    };

    Span::styled(format!(" {label} "), base)
}

/// Single-line text field; the cursor is drawn only while focused.
pub(crate) fn input_line(
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) -> Line<'static> {
    let mut spans = vec![Span::styled(format!("{label}: "), bold())];
    if value.is_empty() && !focused {
        spans.push(Span::styled(placeholder.to_string(), muted()));
    } else {
        spans.push(Span::raw(value.to_string()));
    }
    if focused {
        spans.push(Span::styled("▏", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }
    Line::from(spans)
}

/// Two-line list entry used wherever books are listed.
pub(crate) fn book_item(book: &Book, style: StarStyle, width: usize) -> ListItem<'static> {
    let mut title = vec![Span::styled(book.title.clone(), bold())];
    if book.recommended {
        title.push(Span::styled("  AI Pick", Style::default().fg(Color::Magenta)));
    }

    let mut meta = vec![
        Span::raw(format!("by {}  ", book.author)),
        star_span(book.rating.value(), style),
        Span::raw(format!(" {}", book.rating)),
        Span::styled(format!("  {}", book.genre.label()), muted()),
    ];
    if let Some(time) = &book.reading_time {
        meta.push(Span::styled(format!("  {time}"), muted()));
    }

    let mut lines = vec![Line::from(title), Line::from(meta)];
    for line in wrap_text(&book.ai_summary, width.max(8)).into_iter().take(2) {
        lines.push(Line::styled(line, muted()));
    }
    lines.push(Line::raw(""));
    ListItem::new(Text::from(lines))
}

pub(crate) fn list_state(selected: usize, len: usize) -> ListState {
    let mut state = ListState::default();
    if len > 0 {
        state.select(Some(selected.min(len - 1)));
    }
    state
}

/// Moves a list cursor by `delta`, clamped to the list.
pub(crate) fn step(idx: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    idx.saturating_add_signed(delta).min(len - 1)
}

/// Moves a cursor by `delta`, wrapping around both ends.
pub(crate) fn cycle(idx: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    (idx as isize + delta).rem_euclid(len) as usize
}

pub(crate) fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// `4250` becomes `4,250`.
pub(crate) fn format_count(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub(crate) fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);
        let sep_width = if current.is_empty() { 0 } else { 1 };

        if current_width + sep_width + word_width <= max_width {
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        let mut chunk = String::new();
        let mut chunk_width = 0usize;
        for ch in word.chars() {
            let mut buf = [0u8; 4];
            let w = UnicodeWidthStr::width(&*ch.encode_utf8(&mut buf));
            if chunk_width + w > max_width && !chunk.is_empty() {
                lines.push(std::mem::take(&mut chunk));
                chunk_width = 0;
            }
            chunk.push(ch);
            chunk_width += w;
        }
        if !chunk.is_empty() {
            current = chunk;
            current_width = chunk_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_text_breaks_on_words() {
        assert_eq!(
            wrap_text("a tale of two cities", 9),
            vec!["a tale of", "two", "cities"]
        );
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn wrap_text_splits_long_words() {
        assert_eq!(wrap_text("abcdefgh ij", 3), vec!["abc", "def", "gh", "ij"]);
    }

    #[test]
    fn cursors_clamp_and_wrap() {
        assert_eq!(step(0, 3, -1), 0);
        assert_eq!(step(2, 3, 1), 2);
        assert_eq!(step(5, 0, 1), 0);
        assert_eq!(cycle(0, 3, -1), 2);
        assert_eq!(cycle(2, 3, 1), 0);
    }

    #[test]
    fn counts_get_separators() {
        assert_eq!(format_count(4250), "4,250");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(2_500_000), "2,500,000");
    }

    #[test]
    fn progress_bar_fills_by_ratio() {
        assert_eq!(progress_bar(0.5, 4), "██░░");
        assert_eq!(progress_bar(2.0, 3), "███");
        assert_eq!(progress_bar(0.0, 2), "░░");
    }

    #[test]
    fn centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 50, area);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 25);
        assert_eq!(popup.y, 10);
    }
}
