use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Task list / empty state
            Constraint::Length(3), // Progress
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    // Header
    let header = Paragraph::new("TICKOFF")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(header, main_chunks[0]);

    if app.store.tasks().is_empty() {
        draw_empty_state(f, main_chunks[1]);
    } else {
        draw_task_list(f, app, main_chunks[1]);
    }

    draw_progress(f, app, main_chunks[2]);
    draw_input(f, app, main_chunks[3]);

    // Footer
    let help = match app.input_mode {
        InputMode::Normal => "j/k: Navigate | Space: Toggle | a: Add | e: Edit | d: Delete | q: Quit",
        InputMode::Adding | InputMode::Editing => "Enter: Save | Esc: Cancel",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[4]);

    if app.celebration_ticks > 0 {
        draw_celebration(f, app, size);
    }
}

fn draw_task_list(f: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app
        .store
        .tasks()
        .iter()
        .map(|task| {
            let (icon, text_style) = if task.completed {
                (
                    "✔",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("☐", Style::default().add_modifier(Modifier::BOLD))
            };

            Row::new(vec![
                Span::raw(icon),
                Span::styled(task.text.clone(), text_style),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3), // Checkbox
            Constraint::Min(10),   // Text
        ],
    )
    .header(Row::new(vec!["St", "Task"]).style(Style::default().fg(Color::Yellow)))
    .block(
        Block::default()
            .title(" Tasks ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    )
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_empty_state(f: &mut Frame, area: Rect) {
    let placeholder = Paragraph::new("Nothing here yet.\n\nPress 'a' to add your first task.")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Tasks ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(placeholder, area);
}

fn draw_progress(f: &mut Frame, app: &App, area: Rect) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Progress ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(app.view.ratio())
        .label(app.view.counter());
    f.render_widget(gauge, area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, style) = match app.input_mode {
        InputMode::Normal => (" Task ", Style::default().fg(Color::DarkGray)),
        InputMode::Adding => (" New task ", Style::default().fg(Color::White)),
        InputMode::Editing => (" Edit task ", Style::default().fg(Color::White)),
    };

    let content = match app.input_mode {
        InputMode::Normal => "press 'a' to add a task",
        InputMode::Adding | InputMode::Editing => app.input.as_str(),
    };

    let input = Paragraph::new(content).style(style).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(input, area);

    if !matches!(app.input_mode, InputMode::Normal) {
        // Cursor sits after the glyphs left of it, by display width.
        let prefix: String = app.input.chars().take(app.cursor_position).collect();
        let x = area.x + 1 + prefix.width() as u16;
        f.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn draw_celebration(f: &mut Frame, app: &App, size: Rect) {
    let banner_text = "🎉 ✦ ✧  All tasks completed!  ✧ ✦ 🎉";
    let width = (banner_text.width() as u16 + 4).min(size.width);
    let area = Rect {
        x: size.width.saturating_sub(width) / 2,
        y: size.height / 3,
        width,
        height: size.height.min(3),
    };

    // Flash between two colors while the ticks run down.
    let color = if app.celebration_ticks % 2 == 0 {
        Color::Yellow
    } else {
        Color::Magenta
    };

    f.render_widget(Clear, area);
    let banner = Paragraph::new(banner_text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(banner, area);
}
