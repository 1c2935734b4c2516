//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::theme::Theme;

/// Split a screen into header, body and footer rows
pub fn screen_rows(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Draw the one-line header with the app name and the screen title
pub fn draw_header(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            " dojo ",
            Style::default()
                .fg(theme.bg_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {title}"),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        ),
    ]);
    let header = Paragraph::new(line).style(Style::default().bg(theme.bg_secondary));
    frame.render_widget(header, area);
}

/// Draw a footer of `[key] label` hints
pub fn draw_footer(frame: &mut Frame, area: Rect, hints: &[(&str, &str)], theme: &Theme) {
    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(format!("[{key}]"), Style::default().fg(theme.fg_muted)));
        spans.push(Span::styled(format!(" {label}  "), Style::default().fg(theme.fg_secondary)));
    }
    let footer = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg_primary));
    frame.render_widget(footer, area);
}

/// Render a fixed-width bar, filled proportionally to `value / total`
pub fn progress_bar(value: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 { 0 } else { (value * width) / total };
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
