use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use recents_core::HistoryView;
use textwrap::wrap;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus, Lookup};
use crate::strings::{
    build_status_line, button_label, help_lines_ascii, looking_up, ALERT_DISMISS, APP_TITLE,
    INPUT_HINT, MISSING_CITY, TITLE_ALERT, TITLE_HELP, TITLE_RESULT, TITLE_SEARCH,
};
use crate::theme::THEME;

pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    // History rows depend on the width available inside its border.
    let history_h = match app.view() {
        HistoryView::Hidden => 0,
        HistoryView::Visible { entries, clear, .. } => {
            let inner = Rect {
                x: 0,
                y: 0,
                width: area.width.saturating_sub(2),
                height: 1,
            };
            let labels = history_labels(entries.iter().map(|b| b.label.as_str()), &clear.label);
            let rects = layout_history(&labels, inner);
            rects.last().map(|r| r.y + 1).unwrap_or(0) + 2
        }
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(history_h),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    draw_title(f, chunks[0]);
    draw_input(f, chunks[1], app);
    if history_h > 0 {
        draw_history(f, chunks[2], app);
    } else {
        app.button_areas.clear();
    }
    draw_result(f, chunks[3], app);
    draw_status(f, chunks[4], app);

    if let Some(msg) = &app.alert {
        draw_alert(f, area, msg);
    } else if app.show_help {
        draw_help(f, area);
    }
}

fn history_labels<'a>(entries: impl Iterator<Item = &'a str>, clear: &str) -> Vec<String> {
    entries
        .map(button_label)
        .chain(std::iter::once(button_label(clear)))
        .collect()
}

/// Places entry buttons left to right, wrapping when a row is full, and the
/// last label (the clear button) on a row of its own below them.
pub fn layout_history(labels: &[String], inner: Rect) -> Vec<Rect> {
    let mut out = Vec::with_capacity(labels.len());
    if inner.width == 0 || labels.is_empty() {
        return out;
    }
    let (entries, clear) = labels.split_at(labels.len() - 1);
    let right = inner.x + inner.width;
    let mut x = inner.x;
    let mut y = inner.y;
    for label in entries {
        let w = (UnicodeWidthStr::width(label.as_str()) as u16).min(inner.width);
        if x > inner.x && x + w > right {
            x = inner.x;
            y += 1;
        }
        out.push(Rect::new(x, y, w, 1));
        x += w + 1;
    }
    if !entries.is_empty() {
        y += 1;
    }
    let w = (UnicodeWidthStr::width(clear[0].as_str()) as u16).min(inner.width);
    out.push(Rect::new(inner.x, y, w, 1));
    out
}

fn draw_title(f: &mut Frame, area: Rect) {
    let title = Span::styled(
        APP_TITLE,
        Style::default()
            .fg(THEME.title)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(Paragraph::new(Line::from(title)), area);
}

fn draw_input(f: &mut Frame, area: Rect, app: &mut App) {
    app.input_area = Some(area);
    let focused = matches!(app.focus, Focus::Input);
    let border_style = if focused {
        Style::default().fg(THEME.border_focus)
    } else {
        Style::default().fg(THEME.border_inactive)
    };
    let block = Block::default()
        .title(TITLE_SEARCH)
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner_w = area.width.saturating_sub(2);

    let before: String = app
        .input
        .graphemes(true)
        .take(app.input_cursor)
        .collect();
    let cursor_col = UnicodeWidthStr::width(before.as_str()) as u16;
    // Scroll so the cursor stays inside the box.
    let scroll_x = cursor_col.saturating_sub(inner_w.saturating_sub(1));

    let para = if app.input.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            INPUT_HINT,
            Style::default().fg(THEME.hint),
        )))
    } else {
        Paragraph::new(app.input.as_str()).scroll((0, scroll_x))
    };
    f.render_widget(para.block(block), area);

    if focused && app.alert.is_none() && !app.show_help && inner_w > 0 {
        f.set_cursor_position(Position {
            x: area.x + 1 + cursor_col - scroll_x,
            y: area.y + 1,
        });
    }
}

fn draw_history(f: &mut Frame, area: Rect, app: &mut App) {
    let HistoryView::Visible {
        title,
        entries,
        clear,
    } = app.view()
    else {
        return;
    };
    let block = Block::default()
        .title(Span::styled(
            *title,
            Style::default()
                .fg(THEME.title)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(THEME.border_inactive));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let labels = history_labels(entries.iter().map(|b| b.label.as_str()), &clear.label);
    let rects = layout_history(&labels, inner);
    let last = labels.len() - 1;
    let mut areas = Vec::with_capacity(rects.len());
    for (i, (label, rect)) in labels.iter().zip(rects.iter()).enumerate() {
        let rect = rect.intersection(inner);
        let base = if i == last {
            Style::default().fg(THEME.clear_fg)
        } else {
            Style::default().fg(THEME.button_fg)
        };
        let style = if app.focus == Focus::History(i) {
            Style::default()
                .fg(THEME.button_focus_fg)
                .bg(THEME.button_focus_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            base
        };
        f.render_widget(Paragraph::new(Span::styled(label.as_str(), style)), rect);
        areas.push(rect);
    }
    app.button_areas = areas;
}

fn draw_result(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(TITLE_RESULT)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(THEME.border_inactive));
    let line = match &app.lookup {
        Some(Lookup::City(city)) => Line::from(looking_up(city)),
        Some(Lookup::MissingCity) => Line::from(Span::styled(
            MISSING_CITY,
            Style::default().fg(THEME.alert_border),
        )),
        None => Line::default(),
    };
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let focus = match app.focus {
        Focus::Input => "Input".to_string(),
        Focus::History(i) => format!("History {}/{}", i + 1, app.button_count()),
    };
    let text = build_status_line(
        &focus,
        app.page.history().len(),
        app.page.cache().config().max_items,
        app.submissions,
        &app.storage_label,
        area.width,
    );
    f.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(THEME.hint))),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

fn draw_alert(f: &mut Frame, area: Rect, msg: &str) {
    let width = area.width.saturating_sub(4).min(60);
    let text_w = width.saturating_sub(4).max(1) as usize;
    let mut lines: Vec<Line> = wrap(msg, text_w)
        .into_iter()
        .map(|l| Line::from(l.into_owned()))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        ALERT_DISMISS,
        Style::default().fg(THEME.hint),
    )));
    let rect = centered(area, width, lines.len() as u16 + 2);
    let block = Block::default()
        .title(TITLE_ALERT)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(THEME.alert_border));
    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(lines).block(block), rect);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = help_lines_ascii()
        .iter()
        .map(|l| {
            if l.starts_with(' ') {
                Line::from(*l)
            } else {
                Line::from(Span::styled(
                    *l,
                    Style::default().add_modifier(Modifier::BOLD),
                ))
            }
        })
        .collect();
    let width = help_lines_ascii()
        .iter()
        .map(|l| UnicodeWidthStr::width(*l))
        .max()
        .unwrap_or(0) as u16
        + 4;
    let rect = centered(area, width, lines.len() as u16 + 2);
    let block = Block::default()
        .title(TITLE_HELP)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(THEME.border_focus));
    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(lines).block(block), rect);
}
