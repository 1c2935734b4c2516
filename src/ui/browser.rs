//! Topic browser with search, filters and a detail pane

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
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

/// Draw the browser screen
pub fn draw(
    frame: &mut Frame,
    state: &mut AppState,
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
    layout::draw_header(frame, header, "All Topics", theme);

    let chunks =
        Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(body);
    let filtered = state.browser.filtered(corpus);
    draw_filter_bar(frame, chunks[0], state, corpus, filtered.len(), theme);

    let selected_topic = filtered
        .get(state.browser.selected)
        .map(|&index| &corpus.topics[index]);

    if state.browser.show_detail {
        let panes =
            Layout::horizontal([Constraint::Min(40), Constraint::Percentage(45)]).split(chunks[1]);
        draw_list(frame, panes[0], state, corpus, &filtered, study, theme);
        draw_detail(frame, panes[1], selected_topic, study, theme);
    } else {
        draw_list(frame, chunks[1], state, corpus, &filtered, study, theme);
    }

    if let Some(message) = &state.browser.message {
        let note = Paragraph::new(Span::styled(
            message.clone(),
            Style::default().fg(theme.accent_secondary),
        ))
        .style(Style::default().bg(theme.bg_primary));
        frame.render_widget(note, footer);
    } else if state.browser.search.active {
        layout::draw_footer(
            frame,
            footer,
            &[("Enter", "keep filter"), ("Esc", "clear")],
            theme,
        );
    } else {
        layout::draw_footer(
            frame,
            footer,
            &[
                ("/", "search"),
                ("c", "category"),
                ("d", "depth"),
                ("Enter", "detail"),
                ("y", "copy name"),
                ("Esc", "back"),
            ],
            theme,
        );
    }
}

/// Active search and filters, plus the match count
fn draw_filter_bar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    corpus: &Corpus,
    match_count: usize,
    theme: &Theme,
) {
    let browser = &state.browser;
    let mut spans = vec![Span::raw(" ")];

    if browser.search.active {
        spans.push(Span::styled(
            format!("/{}", browser.search.query),
            Style::default().fg(theme.accent_primary),
        ));
        spans.push(Span::styled("▌", Style::default().fg(theme.cursor)));
    } else if !browser.search.query.is_empty() {
        spans.push(Span::styled(
            format!("/{}", browser.search.query),
            Style::default().fg(theme.accent_secondary),
        ));
    }

    if let Some(category) = &browser.category_filter {
        spans.push(Span::styled(
            format!("  Category: {category}"),
            Style::default().fg(theme.info),
        ));
    }
    if let Some(depth) = browser.depth_filter {
        spans.push(Span::styled(
            format!("  Depth: {}", depth.label()),
            Style::default().fg(theme.info),
        ));
    }

    spans.push(Span::styled(
        format!("  {} of {} topics", match_count, corpus.len()),
        Style::default().fg(theme.fg_muted),
    ));

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg_primary));
    frame.render_widget(bar, area);
}

/// The scrolling topic list
fn draw_list(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    corpus: &Corpus,
    filtered: &[usize],
    study: &StudyProgress,
    theme: &Theme,
) {
    let block = Block::default()
        .title(" Topics ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Update visible height for scroll calculations
    state.browser.visible_height = inner.height as usize;

    if filtered.is_empty() {
        let msg = Paragraph::new("No topics match the current filters")
            .style(Style::default().fg(theme.fg_muted))
            .wrap(Wrap { trim: true });
        frame.render_widget(msg, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (row, &topic_index) in filtered.iter().enumerate() {
        let topic = &corpus.topics[topic_index];
        let selected = row == state.browser.selected;

        let (marker, marker_color) = if study.is_mastered(&topic.name) {
            ("✓", theme.success)
        } else if study.needs_review(&topic.name) {
            ("⟳", theme.warning)
        } else {
            (" ", theme.fg_muted)
        };

        if selected {
            lines.push(Line::from(Span::styled(
                format!(" {} {}  ({})", marker, topic.name, topic.category),
                Style::default()
                    .fg(theme.bg_primary)
                    .bg(theme.accent_primary)
                    .add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(vec![
                Span::styled(format!(" {marker} "), Style::default().fg(marker_color)),
                Span::styled(topic.name.clone(), Style::default().fg(theme.fg_primary)),
                Span::styled(
                    format!("  {}", topic.category),
                    Style::default().fg(theme.fg_muted),
                ),
            ]));
        }
    }

    // Handle scroll offset
    let visible_height = inner.height as usize;
    let start = state.browser.scroll_offset;
    let end = (start + visible_height).min(lines.len());
    let visible_lines: Vec<Line> = lines.into_iter().skip(start).take(end - start).collect();

    frame.render_widget(Paragraph::new(visible_lines), inner);
}

/// Full description of the selected topic
fn draw_detail(
    frame: &mut Frame,
    area: Rect,
    topic: Option<&Topic>,
    study: &StudyProgress,
    theme: &Theme,
) {
    let Some(topic) = topic else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.bg_primary));
        frame.render_widget(block, area);
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", topic.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = (inner.width as usize).saturating_sub(1).max(10);
    let mut lines: Vec<Line> = Vec::new();

    let mut meta = vec![
        Span::styled(topic.category.clone(), Style::default().fg(theme.info)),
        Span::styled(
            format!("  ·  {}", topic.knowledge_depth.label()),
            Style::default().fg(theme.fg_muted),
        ),
    ];
    if study.is_mastered(&topic.name) {
        meta.push(Span::styled("  ✓ Mastered", Style::default().fg(theme.success)));
    } else if study.needs_review(&topic.name) {
        meta.push(Span::styled("  ⟳ Review", Style::default().fg(theme.warning)));
    }
    lines.push(Line::from(meta));
    lines.push(Line::from(""));

    for (heading, text) in [
        ("Problem", &topic.problem_solved),
        ("Scenario", &topic.scenario),
        ("Usage", &topic.usage),
    ] {
        if text.is_empty() {
            continue;
        }
        lines.push(Line::from(Span::styled(
            heading,
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
        )));
        for piece in wrap(text, Options::new(width)) {
            lines.push(Line::from(Span::styled(
                piece.into_owned(),
                Style::default().fg(theme.fg_secondary),
            )));
        }
        lines.push(Line::from(""));
    }

    if !topic.questions.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{} practice questions", topic.questions.len()),
            Style::default().fg(theme.fg_muted),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
