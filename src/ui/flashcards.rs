//! Flashcard deck screen

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use textwrap::{Options, wrap};

use super::layout;
use crate::app::state::AppState;
use crate::corpus::{Corpus, Topic};
use crate::study::StudyProgress;
use crate::theme::Theme;

/// Draw the flashcards screen
pub fn draw(
    frame: &mut Frame,
    state: &AppState,
    corpus: &Corpus,
    study: &StudyProgress,
    theme: &Theme,
) {
    let area = frame.area();
    frame.render_widget(
        Paragraph::new("").style(Style::default().bg(theme.bg_primary)),
        area,
    );

    let (header, body, footer) = layout::screen_rows(area);
    layout::draw_header(frame, header, "Flashcards", theme);
    layout::draw_footer(
        frame,
        footer,
        &[
            ("Space", "flip"),
            ("h/l", "prev/next"),
            ("m", "know it"),
            ("r", "review"),
            ("s", "shuffle"),
            ("Esc", "back"),
        ],
        theme,
    );

    let Some(topic_index) = state.flashcards.current_topic() else {
        let msg = Paragraph::new("No cards to study")
            .style(Style::default().fg(theme.fg_muted))
            .alignment(Alignment::Center);
        frame.render_widget(msg, body);
        return;
    };
    let topic = &corpus.topics[topic_index];

    let chunks =
        Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(body);

    // Deck position and per-card badges
    let mut status = vec![Span::styled(
        format!(
            "Card {} of {}",
            state.flashcards.current + 1,
            state.flashcards.order.len()
        ),
        Style::default().fg(theme.fg_secondary),
    )];
    if state.flashcards.shuffled {
        status.push(Span::styled("  ·  Shuffled", Style::default().fg(theme.fg_muted)));
    }
    if study.is_mastered(&topic.name) {
        status.push(Span::styled("  ✓ Mastered", Style::default().fg(theme.success)));
    } else if study.needs_review(&topic.name) {
        status.push(Span::styled("  ⟳ Review", Style::default().fg(theme.warning)));
    }
    let status_line = Paragraph::new(Line::from(status))
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.bg_primary));
    frame.render_widget(status_line, chunks[0]);

    // The card itself
    let card_area = layout::centered_rect(70, 80, chunks[1]);
    let side = if state.flashcards.flipped { " · back " } else { " · front " };
    let face =
        if state.flashcards.flipped { theme.bg_tertiary } else { theme.bg_secondary };
    let block = Block::default()
        .title(side)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(face));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    if state.flashcards.flipped {
        draw_back(frame, inner, topic, theme);
    } else {
        draw_front(frame, inner, topic, theme);
    }
}

/// Front of a card: just the topic
pub fn draw_front(frame: &mut Frame, area: Rect, topic: &Topic, theme: &Theme) {
    let pad = (area.height / 3) as usize;
    let mut lines: Vec<Line> = std::iter::repeat_with(|| Line::from("")).take(pad).collect();

    lines.push(Line::from(Span::styled(
        topic.name.clone(),
        Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{}  ·  {}", topic.category, topic.knowledge_depth.label()),
        Style::default().fg(theme.fg_muted),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Space to flip",
        Style::default().fg(theme.fg_muted),
    )));

    let card = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(card, area);
}

/// Back of a card: what the topic is for and where it fits
pub fn draw_back(frame: &mut Frame, area: Rect, topic: &Topic, theme: &Theme) {
    let width = (area.width as usize).saturating_sub(4).max(10);
    let mut lines: Vec<Line> = vec![Line::from("")];

    for (heading, text) in [
        ("Problem", &topic.problem_solved),
        ("Scenario", &topic.scenario),
        ("Usage", &topic.usage),
    ] {
        if text.is_empty() {
            continue;
        }
        lines.push(Line::from(Span::styled(
            format!("  {heading}"),
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
        )));
        for piece in wrap(text, Options::new(width)) {
            lines.push(Line::from(Span::styled(
                format!("  {piece}"),
                Style::default().fg(theme.fg_primary),
            )));
        }
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
