use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use vida_assistant::{Inline, ReplyOrigin, Role, parse_inline};

use super::app::{AppMode, ChatApp};
use crate::commands::{clock_time, role_label};

pub fn render(frame: &mut Frame, app: &ChatApp) {
    let suggestions_height = if app.suggestions_open { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                  // Header
            Constraint::Length(suggestions_height), // Suggestions
            Constraint::Min(1),                     // Messages
            Constraint::Length(3),                  // Input
            Constraint::Length(1),                  // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    if app.suggestions_open {
        render_suggestions(frame, chunks[1]);
    }
    render_messages(frame, app, chunks[2]);
    render_input(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);
}

fn render_header(frame: &mut Frame, app: &ChatApp, area: Rect) {
    let mode = if app.responder.is_remote_enabled() {
        "en línea"
    } else {
        "respuestas locales"
    };
    let origin = match app.last_origin {
        Some(ReplyOrigin::Fallback) if app.responder.is_remote_enabled() => {
            "  [última respuesta: reglas locales]"
        }
        _ => "",
    };

    let title = format!("Asistente VIDA NL - {}{}", mode, origin);
    let header =
        Paragraph::new(title).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    frame.render_widget(header, area);
}

fn render_suggestions(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (i, suggestion) in ChatApp::suggestions().iter().enumerate() {
        spans.push(Span::styled(
            format!("F{}", i + 1),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}   ", suggestion.label)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Sugerencias rápidas");
    let paragraph = Paragraph::new(Line::from(spans)).block(block);

    frame.render_widget(paragraph, area);
}

/// Styles one line of message text by its inline markup.
fn styled_line(text: &str, base: Style) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for node in parse_inline(text) {
        let style = match &node {
            Inline::Text(_) => base,
            Inline::Strong(_) => base.add_modifier(Modifier::BOLD),
            Inline::Emphasis(_) => base.add_modifier(Modifier::ITALIC),
            Inline::Code(_) => base.fg(Color::Magenta),
            Inline::Link(_) => base.fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        };
        spans.push(Span::styled(node.text().to_string(), style));
    }
    Line::from(spans)
}

fn render_messages(frame: &mut Frame, app: &ChatApp, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    for msg in app.messages() {
        let (header_style, body_style) = match msg.role {
            Role::User => (Style::default().fg(Color::Green), Style::default()),
            Role::Assistant => (Style::default().fg(Color::Blue), Style::default()),
            Role::System => (
                Style::default().fg(Color::Yellow),
                Style::default().fg(Color::Yellow),
            ),
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("{}:", role_label(msg.role)),
                header_style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", clock_time(msg)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        for line in msg.content.lines() {
            lines.push(styled_line(line, body_style));
        }

        lines.push(Line::from("")); // Empty line between messages
    }

    if app.mode == AppMode::Waiting {
        lines.push(Line::from(Span::styled(
            "Pensando…",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )));
    }

    let messages_block = Block::default().borders(Borders::ALL).title("Conversación");

    // Keep the bottom of the conversation in view
    let visible_height = area.height.saturating_sub(2) as usize;
    let total_lines = lines.len();
    let scroll = if total_lines > visible_height {
        (total_lines - visible_height).saturating_sub(app.messages_scroll as usize)
    } else {
        0
    };

    let paragraph = Paragraph::new(Text::from(lines))
        .block(messages_block)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));

    frame.render_widget(paragraph, area);
}

fn render_input(frame: &mut Frame, app: &ChatApp, area: Rect) {
    let input_block = Block::default().borders(Borders::ALL).title("Escribe tu mensaje");

    let (display_text, style) = if app.input.is_empty() {
        (
            "Escribe tu mensaje… (Enter para enviar)".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.input.clone(), Style::default())
    };

    let input_paragraph = Paragraph::new(display_text).style(style).block(input_block);

    frame.render_widget(input_paragraph, area);

    let cursor_x = area.x + 1 + app.cursor_column() as u16;
    frame.set_cursor_position((cursor_x, area.y + 1));
}

fn render_status_bar(frame: &mut Frame, app: &ChatApp, area: Rect) {
    let status = match app.mode {
        AppMode::Chat => {
            "Enter: Enviar  F1-F5: Sugerencias  Ctrl+S: Mostrar/ocultar  Ctrl+L: Limpiar  Ctrl+↑/↓: Desplazar  Esc: Salir"
        }
        AppMode::Waiting => "El asistente está escribiendo…  Esc: Salir",
    };

    let status_bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}
