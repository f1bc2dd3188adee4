use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn modal_title(modal: &super::Modal) -> String {
    match &modal.kind {
        super::ModalKind::Viewer => format!("{} (Esc to close)", modal.title),
        super::ModalKind::Alert => modal.title.clone(),
        super::ModalKind::TextInput { .. } => format!("{} (Enter to submit)", modal.title),
    }
}

pub(super) fn draw_modal(frame: &mut ratatui::Frame, modal: &super::Modal) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 90);
    let h = area.height.saturating_sub(6).clamp(8, 22);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    let box_area = ratatui::layout::Rect {
        x,
        y,
        width: w,
        height: h,
    };

    frame.render_widget(ratatui::widgets::Clear, box_area);

    let border = match modal.kind {
        super::ModalKind::Alert => Style::default().fg(Color::Red),
        _ => Style::default(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(modal_title(modal));
    frame.render_widget(block.clone(), box_area);
    let inner = block.inner(box_area);

    let lines: Vec<Line> = modal.lines.iter().map(|s| Line::from(s.as_str())).collect();
    let scroll = modal.scroll.min(modal.lines.len().saturating_sub(1)) as u16;

    match &modal.kind {
        super::ModalKind::Viewer | super::ModalKind::Alert => {
            frame.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .scroll((scroll, 0)),
                inner,
            );
        }

        super::ModalKind::TextInput { prompt, .. } => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(3)])
                .split(inner);

            frame.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .scroll((scroll, 0)),
                parts[0],
            );

            // Long values (pasted JSON) scroll horizontally to keep the
            // cursor visible.
            let field_w = parts[1].width.saturating_sub(2) as usize;
            let cursor = prompt.chars().count() + modal.input.cursor_col();
            let offset = cursor.saturating_sub(field_w.saturating_sub(1));
            let input_line = Line::from(vec![
                Span::styled(prompt.as_str(), Style::default().fg(Color::Yellow)),
                Span::raw(modal.input.buf.as_str()),
            ]);
            frame.render_widget(
                Paragraph::new(input_line)
                    .scroll((0, offset as u16))
                    .block(Block::default().borders(Borders::ALL).title("Edit")),
                parts[1],
            );

            let x = (cursor - offset) as u16;
            frame.set_cursor_position((parts[1].x + 1 + x, parts[1].y + 1));
        }
    }
}

pub(super) fn handle_modal_key(app: &mut super::App, key: KeyEvent) {
    enum ModalAction {
        None,
        Close,
        SubmitTextInput {
            action: super::TextInputAction,
            value: String,
        },
    }

    let action = {
        let Some(m) = app.modal_mut() else {
            return;
        };

        match &mut m.kind {
            super::ModalKind::Alert => ModalAction::Close,
            super::ModalKind::Viewer => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Up => {
                    m.scroll = m.scroll.saturating_sub(1);
                    ModalAction::None
                }
                KeyCode::Down => {
                    if m.scroll < m.lines.len().saturating_sub(1) {
                        m.scroll += 1;
                    }
                    ModalAction::None
                }
                KeyCode::PageUp => {
                    m.scroll = m.scroll.saturating_sub(10);
                    ModalAction::None
                }
                KeyCode::PageDown => {
                    m.scroll = (m.scroll + 10).min(m.lines.len().saturating_sub(1));
                    ModalAction::None
                }
                KeyCode::Home => {
                    m.scroll = 0;
                    ModalAction::None
                }
                KeyCode::End => {
                    m.scroll = m.lines.len().saturating_sub(1);
                    ModalAction::None
                }
                _ => ModalAction::None,
            },

            super::ModalKind::TextInput { action, .. } => match key.code {
                KeyCode::Esc => ModalAction::Close,
                KeyCode::Enter => {
                    // Draft text is sent verbatim, surrounding whitespace included.
                    let raw = match action {
                        super::TextInputAction::EditDraft => m.input.buf.clone(),
                        _ => m.input.buf.trim().to_string(),
                    };
                    let required = matches!(
                        action,
                        super::TextInputAction::AiPrompt
                            | super::TextInputAction::TextMessage
                            | super::TextInputAction::ImportConfig
                    );
                    if raw.is_empty() && required {
                        m.lines.retain(|l| !l.starts_with("error:"));
                        m.lines.push("error: value required".to_string());
                        return;
                    }
                    ModalAction::SubmitTextInput {
                        action: action.clone(),
                        value: raw,
                    }
                }
                KeyCode::Backspace => {
                    m.input.backspace();
                    ModalAction::None
                }
                KeyCode::Delete => {
                    m.input.delete();
                    ModalAction::None
                }
                KeyCode::Left => {
                    m.input.move_left();
                    ModalAction::None
                }
                KeyCode::Right => {
                    m.input.move_right();
                    ModalAction::None
                }
                KeyCode::Home => {
                    m.input.cursor = 0;
                    ModalAction::None
                }
                KeyCode::End => {
                    m.input.cursor = m.input.buf.len();
                    ModalAction::None
                }
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    m.input.clear();
                    ModalAction::None
                }
                KeyCode::Char(c) => {
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT)
                    {
                        m.input.insert_char(c);
                    }
                    ModalAction::None
                }
                _ => ModalAction::None,
            },
        }
    };

    match action {
        ModalAction::None => {}
        ModalAction::Close => app.close_modal(),
        ModalAction::SubmitTextInput { action, value } => {
            app.close_modal();
            app.submit_text_input(action, value);
        }
    }
}
