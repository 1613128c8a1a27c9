use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use farmhand_core::filter::SmartGroup;
use farmhand_core::time::format_timestamp_date;

use crate::app::{App, Mode};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(size);

    render_header(frame, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(20)])
        .split(chunks[1]);
    render_sidebar(frame, body[0], app);
    render_table(frame, body[1], app);

    render_footer(frame, chunks[2], app);

    if app.show_help {
        render_help(frame, size);
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let search_display = if app.search_input.is_empty() {
        "(none)".to_string()
    } else {
        app.search_input.clone()
    };
    let quick = if app.quick.is_empty() {
        String::new()
    } else {
        let keys: Vec<&str> = app.quick.iter().map(|quick| quick.key()).collect();
        format!("  quick: {}", keys.join(","))
    };
    let title = format!(
        "buyers: {}/{}  search: {}{}",
        app.visible.len(),
        app.buyers.len(),
        search_display,
        quick
    );
    let mut lines = vec![Line::from(title)];
    if app.mode == Mode::SearchEditing {
        lines.push(Line::from(Span::styled(
            format!("search> {}_", app.search_input),
            Style::default().fg(Color::Yellow),
        )));
    }

    let block = Block::default().borders(Borders::ALL).title("farmhand");
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_sidebar(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let mut items: Vec<ListItem> = Vec::with_capacity(SmartGroup::ALL.len() + 1);
    items.push(sidebar_item(
        "All Buyers",
        app.buyers.len(),
        app.smart_group.is_none(),
    ));
    for group in SmartGroup::ALL {
        items.push(sidebar_item(
            group.label(),
            app.counts.get(group),
            app.smart_group == Some(group),
        ));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Smart Groups"),
    );
    frame.render_widget(list, area);
}

fn sidebar_item(label: &str, count: usize, selected: bool) -> ListItem<'static> {
    let style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    ListItem::new(Line::from(Span::styled(
        format!("{label} ({count})"),
        style,
    )))
}

fn render_table(frame: &mut Frame<'_>, area: Rect, app: &App) {
    if app.visible.is_empty() {
        let paragraph = Paragraph::new(app.empty_hint)
            .block(Block::default().borders(Borders::ALL).title("Buyers"))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .visible
        .iter()
        .filter_map(|index| app.buyers.get(*index))
        .map(|buyer| {
            let score_style = if buyer.score >= 85 {
                Style::default().fg(Color::Red)
            } else if buyer.score >= 80 {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mut spans = vec![
                Span::styled(format!("[{:>3}] ", buyer.score), score_style),
                Span::raw(buyer.display_name()),
                Span::styled(
                    format!("  {}", buyer.status.as_str()),
                    Style::default().fg(Color::Blue),
                ),
            ];
            if buyer.vip {
                spans.push(Span::styled(" *", Style::default().fg(Color::Yellow)));
            }
            if !buyer.tags.is_empty() {
                let tags = buyer
                    .tags
                    .iter()
                    .map(|tag| format!("#{}", tag))
                    .collect::<Vec<_>>()
                    .join(" ");
                spans.push(Span::styled(
                    format!("  {}", tags),
                    Style::default().fg(Color::Magenta),
                ));
            }
            spans.push(Span::styled(
                format!("  {}", format_timestamp_date(buyer.created_at)),
                Style::default().fg(Color::DarkGray),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Buyers"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let hint = match app.mode {
        Mode::List => "j/k move  / search  tab group  1-4 quick  r reload  x clear  ? help  q quit",
        Mode::SearchEditing => "type to filter  enter keep  esc clear",
    };

    let mut lines = vec![Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    ))];

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        )));
    }
    if let Some(err) = &app.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let width = area.width.min(52);
    let height = area.height.min(12);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let lines = vec![
        Line::from("j/k or arrows  move selection"),
        Line::from("/              incremental search"),
        Line::from("tab            cycle smart group"),
        Line::from("1-4            toggle quick filters"),
        Line::from("               (vip, high-score, hot, new)"),
        Line::from("r              reload from the store"),
        Line::from("x or esc       clear all filters"),
        Line::from("q              quit"),
    ];

    frame.render_widget(Clear, popup);
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Help"));
    frame.render_widget(paragraph, popup);
}
