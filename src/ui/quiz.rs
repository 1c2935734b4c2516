//! Quiz screen

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout;
use crate::app::state::AppState;
use crate::quiz::{QuizPhase, QuizSession};
use crate::theme::Theme;

/// Draw the quiz screen
pub fn draw(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(
        Paragraph::new("").style(Style::default().bg(theme.bg_primary)),
        area,
    );

    let (header, body, footer) = layout::screen_rows(area);
    layout::draw_header(frame, header, "Quiz", theme);

    let Some(session) = &state.quiz else {
        return;
    };

    let hints: &[(&str, &str)] = match session.phase() {
        QuizPhase::Answering => &[("j/k", "select"), ("Enter", "confirm"), ("Esc", "leave")],
        QuizPhase::Feedback => &[("Enter", "continue"), ("Esc", "leave")],
        QuizPhase::Complete => &[("Enter", "done")],
    };
    layout::draw_footer(frame, footer, hints, theme);

    let quiz_area = layout::centered_rect(72, 85, body);
    let block = Block::default()
        .title(format!(" {} ", session.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    let inner = block.inner(quiz_area);
    frame.render_widget(block, quiz_area);

    match session.phase() {
        QuizPhase::Answering => draw_question(frame, inner, session, theme),
        QuizPhase::Feedback => draw_feedback(frame, inner, session, theme),
        QuizPhase::Complete => draw_results(frame, inner, session, theme),
    }
}

/// Questions answered so far, for the running score
fn answered(session: &QuizSession) -> usize {
    match session.phase() {
        QuizPhase::Answering => session.question_number() - 1,
        _ => session.question_number(),
    }
}

/// Position line shown above the question in both active phases
fn position_line(session: &QuizSession, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("Question {} of {}", session.question_number(), session.total()),
            Style::default().fg(theme.fg_muted),
        ),
        Span::raw("    "),
        Span::styled(
            format!("Score: {} / {}", session.score(), answered(session)),
            Style::default().fg(theme.fg_secondary),
        ),
    ])
}

/// Draw current question
fn draw_question(frame: &mut Frame, area: Rect, session: &QuizSession, theme: &Theme) {
    let Some(question) = session.current_question() else {
        return;
    };

    let mut lines = vec![position_line(session, theme), Line::from("")];

    lines.push(Line::from(Span::styled(
        question.question.clone(),
        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(""));

    for (i, option) in question.options.iter().enumerate() {
        let is_selected = i == session.selected();
        let prefix = if is_selected { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○
        let letter = (b'A' + i as u8) as char;

        let style = if is_selected {
            Style::default()
                .fg(theme.accent_primary)
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_secondary)
        };

        lines.push(Line::from(Span::styled(
            format!("  {} {}) {}", prefix, letter, option),
            style,
        )));
        lines.push(Line::from(""));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

/// Draw the answered question with its verdict and explanation
fn draw_feedback(frame: &mut Frame, area: Rect, session: &QuizSession, theme: &Theme) {
    let Some(question) = session.current_question() else {
        return;
    };
    let correct_index = question.options.iter().position(|o| question.is_correct(o));

    let mut lines = vec![position_line(session, theme), Line::from("")];

    lines.push(Line::from(Span::styled(
        question.question.clone(),
        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for (i, option) in question.options.iter().enumerate() {
        let letter = (b'A' + i as u8) as char;
        let (marker, style) = if Some(i) == correct_index {
            ("\u{2713}", Style::default().fg(theme.success).add_modifier(Modifier::BOLD))
        } else if Some(i) == session.chosen() {
            ("\u{2717}", Style::default().fg(theme.error))
        } else {
            ("\u{25CB}", Style::default().fg(theme.fg_muted))
        };

        lines.push(Line::from(Span::styled(
            format!("  {} {}) {}", marker, letter, option),
            style,
        )));
    }
    lines.push(Line::from(""));

    match session.was_correct() {
        Some(true) => lines.push(Line::from(Span::styled(
            format!("Correct! The answer is {}.", question.answer),
            Style::default().fg(theme.success),
        ))),
        _ => lines.push(Line::from(Span::styled(
            format!("Incorrect. The correct answer is {}.", question.answer),
            Style::default().fg(theme.error),
        ))),
    }

    if let Some(explanation) = &question.explanation {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            explanation.clone(),
            Style::default().fg(theme.fg_secondary),
        )));
    }

    if let Some(name) = &question.topic_name {
        let context = match &question.topic_category {
            Some(category) => format!("Topic: {name} ({category})"),
            None => format!("Topic: {name}"),
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(context, Style::default().fg(theme.fg_muted))));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

/// Draw results screen
fn draw_results(frame: &mut Frame, area: Rect, session: &QuizSession, theme: &Theme) {
    let percent = session.percent();

    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Quiz Complete!",
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("You scored {} out of {} ({}%)", session.score(), session.total(), percent),
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(""),
        Line::from(Span::styled(
            session.verdict(),
            Style::default().fg(verdict_color(percent, theme)).add_modifier(Modifier::BOLD),
        )),
    ];

    let para = Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(para, area);
}

/// Tier color for the closing verdict
fn verdict_color(percent: u32, theme: &Theme) -> Color {
    if percent >= 80 {
        theme.success
    } else if percent >= 60 {
        theme.warning
    } else {
        theme.error
    }
}
