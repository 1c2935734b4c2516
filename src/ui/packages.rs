//! Practice packages screen
//!
//! Three faces: a setup form when no package set exists, the summary and
//! package list when one does, and a reset confirmation overlay.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::layout;
use crate::app::state::AppState;
use crate::corpus::Corpus;
use crate::packages::{PackageConfig, stats_for};
use crate::theme::Theme;

/// Seed characters shown before truncation
const SEED_DISPLAY_LEN: usize = 12;

/// Draw the packages screen
pub fn draw(frame: &mut Frame, state: &AppState, corpus: &Corpus, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(
        Paragraph::new("").style(Style::default().bg(theme.bg_primary)),
        area,
    );

    let (header, body, footer) = layout::screen_rows(area);
    layout::draw_header(frame, header, "Practice Packages", theme);

    if state.packages.setup {
        draw_setup(frame, body, state, corpus, theme);
        layout::draw_footer(
            frame,
            footer,
            &[("0-9", "type"), ("Enter", "generate"), ("Esc", "cancel")],
            theme,
        );
    } else if let Some(config) = &state.packages.config {
        draw_summary(frame, body, state, config, theme);
        layout::draw_footer(
            frame,
            footer,
            &[
                ("j/k", "select"),
                ("Enter", "start quiz"),
                ("n", "new set"),
                ("x", "reset"),
                ("Esc", "back"),
            ],
            theme,
        );
    }

    if state.packages.confirm_reset {
        draw_reset_confirm(frame, area, theme);
    }
}

/// The questions-per-package form
fn draw_setup(frame: &mut Frame, body: Rect, state: &AppState, corpus: &Corpus, theme: &Theme) {
    let form_area = layout::centered_rect(50, 55, body);
    let block = Block::default()
        .title(" New Package Set ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Questions per package",
            Style::default().fg(theme.fg_secondary),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("> {}", state.packages.size_input),
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled("▌", Style::default().fg(theme.cursor)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} questions in the pool", corpus.question_count()),
            Style::default().fg(theme.fg_muted),
        )),
    ];

    if let Some(error) = &state.packages.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.error),
        )));
    }

    let form = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(form, inner);
}

/// Active set overview plus the scrolling package list
fn draw_summary(
    frame: &mut Frame,
    body: Rect,
    state: &AppState,
    config: &PackageConfig,
    theme: &Theme,
) {
    let chunks =
        Layout::vertical([Constraint::Length(6), Constraint::Min(3)]).split(body);

    let block = Block::default()
        .title(" Active Set ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    let label = Style::default().fg(theme.fg_muted);
    let value = Style::default().fg(theme.fg_primary);
    let overview = vec![
        Line::from(vec![
            Span::styled(" Seed: ", label),
            Span::styled(display_seed(&config.seed), value),
        ]),
        Line::from(vec![
            Span::styled(" Created: ", label),
            Span::styled(display_date(&config.created_at), value),
        ]),
        Line::from(vec![
            Span::styled(" Questions per Package: ", label),
            Span::styled(config.questions_per_package.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" Total: ", label),
            Span::styled(format!("{} questions", config.total_questions), value),
        ]),
    ];
    frame.render_widget(Paragraph::new(overview), inner);

    draw_package_list(frame, chunks[1], state, config, theme);
}

/// Two lines per package: name with score, then bar and last attempt
fn draw_package_list(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    config: &PackageConfig,
    theme: &Theme,
) {
    let block = Block::default()
        .title(" Packages ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let count = config.packages.len();
    if count == 0 {
        return;
    }

    // Keep the selection centered in the visible window
    let rows_visible = (inner.height as usize / 2).max(1);
    let mut start = state.packages.selected.saturating_sub(rows_visible / 2);
    if start + rows_visible > count {
        start = count.saturating_sub(rows_visible);
    }

    let mut lines: Vec<Line> = Vec::new();
    for (row, package) in config.packages.iter().enumerate().skip(start).take(rows_visible) {
        let selected = row == state.packages.selected;
        let stats = stats_for(&state.packages.progress, &package.id);
        let total = package.total_questions;

        let name_style = if selected {
            Style::default()
                .fg(theme.bg_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_primary)
        };
        let marker = if selected { "▶" } else { " " };

        let first = vec![
            Span::styled(format!("{} {}  ", marker, package.name), name_style),
            Span::styled(
                format!("{}/{} ({}%)", stats.completed, total, stats.percent(total)),
                Style::default().fg(theme.fg_secondary),
            ),
        ];
        lines.push(Line::from(first));

        let mut second = vec![
            Span::raw("   "),
            Span::styled(
                layout::progress_bar(stats.completed, total, 20),
                Style::default().fg(theme.accent_primary),
            ),
        ];
        if stats.attempted() {
            second.push(Span::styled(
                format!("  Last attempt: {}", display_date(&stats.last_attempt)),
                Style::default().fg(theme.fg_muted),
            ));
        }
        lines.push(Line::from(second));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Centered confirmation overlay for the reset action
fn draw_reset_confirm(frame: &mut Frame, area: Rect, theme: &Theme) {
    let overlay = layout::centered_rect(50, 30, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(" Reset Packages ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.warning))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Reset shuffle seed and clear all progress?",
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", Style::default().fg(theme.fg_muted)),
            Span::styled(" Yes    ", Style::default().fg(theme.fg_secondary)),
            Span::styled("[n]", Style::default().fg(theme.fg_muted)),
            Span::styled(" No", Style::default().fg(theme.fg_secondary)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Seeds are long; show a prefix
fn display_seed(seed: &str) -> String {
    let mut chars = seed.chars();
    let prefix: String = chars.by_ref().take(SEED_DISPLAY_LEN).collect();
    if chars.next().is_some() {
        format!("{}...", prefix)
    } else {
        prefix
    }
}

/// The date part of an RFC 3339 timestamp
fn display_date(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn long_seed_is_truncated_with_ellipsis() {
        assert_eq!(display_seed("1712345678901abcdef"), "171234567890...");
    }

    #[test]
    fn short_seed_is_shown_whole() {
        assert_eq!(display_seed("abc"), "abc");
    }

    #[test]
    fn seed_truncation_respects_char_boundaries() {
        // 12 chars but 13 bytes; a byte cut would land inside the 'é'
        assert_eq!(display_seed("12345678901é"), "12345678901é");
        assert_eq!(display_seed("ééééééééééééabc"), "éééééééééééé...");
    }

    #[test]
    fn display_date_takes_the_date_part() {
        assert_eq!(display_date("2024-06-01T12:30:00.000Z"), "2024-06-01");
        assert_eq!(display_date("short"), "short");
    }
}
