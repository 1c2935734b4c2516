//! Mode selection menu

use ratatui::{
    Frame,
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::layout;
use crate::app::state::{AppState, MenuItem};
use crate::corpus::Corpus;
use crate::study::StudyProgress;
use crate::theme::Theme;

/// Draw the menu screen
pub fn draw(
    frame: &mut Frame,
    state: &AppState,
    corpus: &Corpus,
    study: &StudyProgress,
    theme: &Theme,
) {
    let area = frame.area();

    // Fill background
    let bg_style = Style::default().bg(theme.bg_primary);
    frame.render_widget(Paragraph::new("").style(bg_style), area);

    let (_, body, footer) = layout::screen_rows(area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "D O J O",
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "a study hall for system design",
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(""),
        Line::from(""),
    ];

    for (index, item) in MenuItem::ALL.iter().enumerate() {
        let selected = index == state.menu.selected;
        let title_style = if selected {
            Style::default()
                .fg(theme.bg_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_primary)
        };
        let marker = if selected { "▶ " } else { "  " };

        lines.push(Line::from(Span::styled(
            format!("{}{}  ", marker, item.title()),
            title_style,
        )));
        lines.push(Line::from(Span::styled(
            item.blurb().to_string(),
            Style::default().fg(theme.fg_muted),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    lines.push(mastery_line(corpus, study, theme));
    lines.push(stats_line(study, theme));

    let menu = Paragraph::new(lines).alignment(Alignment::Center).style(bg_style);
    frame.render_widget(menu, body);

    layout::draw_footer(
        frame,
        footer,
        &[("j/k", "move"), ("Enter", "open"), ("q", "quit")],
        theme,
    );
}

/// Mastered-vs-corpus bar under the menu
fn mastery_line(corpus: &Corpus, study: &StudyProgress, theme: &Theme) -> Line<'static> {
    let total = corpus.len();
    let mastered = study.mastered_topics.len();
    let percent = if total == 0 { 0 } else { mastered * 100 / total };

    Line::from(vec![
        Span::styled(
            layout::progress_bar(mastered, total, 24),
            Style::default().fg(theme.success),
        ),
        Span::styled(
            format!("  {}/{} mastered ({}%)", mastered, total, percent),
            Style::default().fg(theme.fg_secondary),
        ),
    ])
}

/// One line of cross-mode numbers under the menu
fn stats_line(study: &StudyProgress, theme: &Theme) -> Line<'static> {
    let days = if study.study_streak == 1 { "day" } else { "days" };
    Line::from(vec![
        Span::styled(
            format!("Streak: {} {}", study.study_streak, days),
            Style::default().fg(theme.accent_secondary),
        ),
        Span::styled("    ", Style::default()),
        Span::styled(
            format!("Review: {}", study.review_topics.len()),
            Style::default().fg(theme.warning),
        ),
    ])
}
