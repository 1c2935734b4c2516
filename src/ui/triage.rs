//! Swipe review screen
//!
//! The card on screen follows the gesture offset horizontally, sliding off
//! the edge on a committed swipe. Rects near the screen edge are clipped
//! against the body area so a card in flight never renders out of bounds.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{flashcards, layout};
use crate::app::state::AppState;
use crate::app::swipe::COMMIT_THRESHOLD;
use crate::corpus::Corpus;
use crate::theme::Theme;

/// Draw the swipe review screen
pub fn draw(frame: &mut Frame, state: &AppState, corpus: &Corpus, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(
        Paragraph::new("").style(Style::default().bg(theme.bg_primary)),
        area,
    );

    let (header, body, footer) = layout::screen_rows(area);
    layout::draw_header(frame, header, "Swipe Review", theme);

    if state.triage.complete {
        draw_complete(frame, body, state, theme);
        layout::draw_footer(
            frame,
            footer,
            &[("Enter", "go again"), ("Esc", "back")],
            theme,
        );
        return;
    }

    layout::draw_footer(
        frame,
        footer,
        &[
            ("←/→", "review / know"),
            ("Space", "flip"),
            ("drag", "swipe the card"),
            ("Esc", "back"),
        ],
        theme,
    );

    let Some(topic_index) = state.triage.current_topic() else {
        return;
    };
    let topic = &corpus.topics[topic_index];

    let chunks =
        Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(body);

    let status = Paragraph::new(Span::styled(
        format!("Card {} of {}", state.triage.current + 1, state.triage.deck.len()),
        Style::default().fg(theme.fg_secondary),
    ))
    .alignment(Alignment::Center)
    .style(Style::default().bg(theme.bg_primary));
    frame.render_widget(status, chunks[0]);

    // Card, displaced by the gesture and clipped to the body
    let card_area = layout::centered_rect(60, 75, chunks[1]);
    let shifted = shift_rect(card_area, state.triage.gesture.offset(), chunks[1]);

    draw_drag_hint(frame, chunks[1], card_area, state, theme);

    if shifted.width < 3 || shifted.height < 3 {
        return;
    }

    let face = if state.triage.flipped { theme.bg_tertiary } else { theme.bg_secondary };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(face));
    let inner = block.inner(shifted);
    frame.render_widget(block, shifted);

    if state.triage.flipped {
        flashcards::draw_back(frame, inner, topic, theme);
    } else {
        flashcards::draw_front(frame, inner, topic, theme);
    }
}

/// Directional labels that light up as the card is pulled
fn draw_drag_hint(frame: &mut Frame, body: Rect, card_area: Rect, state: &AppState, theme: &Theme) {
    let pull = state.triage.gesture.pull();
    if !state.triage.gesture.is_dragging() || pull.abs() < 1.0 {
        return;
    }
    let committed = pull.abs() >= COMMIT_THRESHOLD;
    let modifier = if committed { Modifier::BOLD } else { Modifier::DIM };

    let hint_y = card_area.y.saturating_sub(1).max(body.y);
    let hint_area = Rect::new(body.x, hint_y, body.width, 1);
    let hint = if pull > 0.0 {
        Paragraph::new(Span::styled(
            "KNOW ✓  ",
            Style::default().fg(theme.success).add_modifier(modifier),
        ))
        .alignment(Alignment::Right)
    } else {
        Paragraph::new(Span::styled(
            "  ⟲ REVIEW",
            Style::default().fg(theme.warning).add_modifier(modifier),
        ))
        .alignment(Alignment::Left)
    };
    frame.render_widget(hint, hint_area);
}

/// End-of-session tallies
fn draw_complete(frame: &mut Frame, body: Rect, state: &AppState, theme: &Theme) {
    let known = state.triage.known;
    let learning = state.triage.learning;

    let verdict = if learning == 0 && known > 0 {
        "Perfect! You know all these topics!"
    } else if known > learning {
        "Great job! Keep it up!"
    } else {
        "Keep practicing!"
    };

    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Session Complete!",
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("Know: {known}"), Style::default().fg(theme.success)),
            Span::raw("    "),
            Span::styled(format!("Review: {learning}"), Style::default().fg(theme.warning)),
        ]),
        Line::from(""),
        Line::from(Span::styled(verdict, Style::default().fg(theme.fg_primary))),
    ];

    let summary = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.bg_primary));
    frame.render_widget(summary, body);
}

/// Displace a rect horizontally and clip it to `bounds`
fn shift_rect(rect: Rect, offset: i16, bounds: Rect) -> Rect {
    let new_x = i32::from(rect.x) + i32::from(offset);
    if new_x < i32::from(bounds.x) {
        // Hanging off the left edge: keep the visible remainder
        let overhang = (i32::from(bounds.x) - new_x) as u16;
        if overhang >= rect.width {
            return Rect::new(bounds.x, rect.y, 0, rect.height);
        }
        return Rect::new(bounds.x, rect.y, rect.width - overhang, rect.height)
            .intersection(bounds);
    }
    Rect::new(new_x as u16, rect.y, rect.width, rect.height).intersection(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BOUNDS: Rect = Rect { x: 0, y: 0, width: 100, height: 30 };

    #[test]
    fn unshifted_card_is_unchanged() {
        let card = Rect::new(20, 5, 40, 20);
        assert_eq!(shift_rect(card, 0, BOUNDS), card);
    }

    #[test]
    fn shift_moves_the_card_right() {
        let card = Rect::new(20, 5, 40, 20);
        assert_eq!(shift_rect(card, 10, BOUNDS), Rect::new(30, 5, 40, 20));
    }

    #[test]
    fn right_overflow_is_clipped() {
        let card = Rect::new(20, 5, 40, 20);
        let shifted = shift_rect(card, 55, BOUNDS);
        assert_eq!(shifted.x, 75);
        assert_eq!(shifted.width, 25);
    }

    #[test]
    fn left_overhang_keeps_visible_remainder() {
        let card = Rect::new(20, 5, 40, 20);
        let shifted = shift_rect(card, -30, BOUNDS);
        assert_eq!(shifted.x, 0);
        assert_eq!(shifted.width, 30);
    }

    #[test]
    fn fully_off_screen_collapses_to_zero_width() {
        let card = Rect::new(20, 5, 40, 20);
        assert_eq!(shift_rect(card, -70, BOUNDS).width, 0);
        assert_eq!(shift_rect(card, 90, BOUNDS).width, 0);
    }
}
