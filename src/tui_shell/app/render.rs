use super::*;

/// Rows of the activity-log panel, borders included.
const LOG_PANEL_HEIGHT: u16 = 8;

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Info => Style::default().fg(Color::Cyan),
        Severity::Success => Style::default().fg(Color::Green),
        Severity::Error => Style::default().fg(Color::Red),
        Severity::Warning => Style::default().fg(Color::Yellow),
    }
}

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(LOG_PANEL_HEIGHT),
            Constraint::Length(if app.suggestions.is_empty() { 0 } else { 9 }),
            Constraint::Length(2),
        ])
        .split(area);

    // Header
    let mut spans = vec![
        Span::styled("IoT Bridge", Style::default().fg(Color::Black).bg(Color::White)),
        Span::raw("  "),
        Span::styled(app.prompt(), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
    ];
    if app.session.is_connected() {
        let project = app
            .session
            .descriptor()
            .map(|d| d.project_id.as_str())
            .unwrap_or("");
        spans.push(Span::styled(
            format!("connected {}", project),
            Style::default().fg(Color::Green),
        ));
    } else if app.descriptor.is_configured() {
        spans.push(Span::styled("disconnected", Style::default().fg(Color::Red)));
    } else {
        spans.push(Span::styled(
            "not configured",
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(g) = &app.generator {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("ai {}", g.model()),
            Style::default().fg(Color::Gray),
        ));
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    // Main view
    let ctx = RenderCtx {
        now: OffsetDateTime::now_utc(),
    };
    if let Some(view) = app.view() {
        view.render(frame, chunks[1], &ctx);
    }

    // Activity log: newest entries that fit, oldest at top.
    {
        let inner_h = LOG_PANEL_HEIGHT.saturating_sub(1) as usize;
        let entries = app.log.entries();
        let mut lines = Vec::new();
        if entries.is_empty() {
            lines.push(Line::from(Span::styled(
                "No logs generated yet...",
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )));
        }
        let start = entries.len().saturating_sub(inner_h);
        for e in &entries[start..] {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("[{}] ", fmt_clock(e.created_at)),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("{: <8}", e.severity.as_str().to_uppercase()),
                    severity_style(e.severity),
                ),
                Span::raw(e.message.as_str()),
            ]));
        }
        let title = match &app.last_command {
            Some(cmd) => format!("Activity Log  (last: {})", cmd),
            None => "Activity Log".to_string(),
        };
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::TOP).title(title)),
            chunks[2],
        );
    }

    // Suggestions
    if !app.suggestions.is_empty() {
        let mut s_lines = Vec::new();
        let total = app.suggestions.len();
        let sel_idx = app.suggestion_selected.min(total.saturating_sub(1));
        s_lines.push(Line::from(Span::styled(
            format!("Suggestions {}/{}", sel_idx + 1, total),
            Style::default().fg(Color::Gray),
        )));

        let inner_h = chunks[3].height.saturating_sub(2) as usize;
        let max_items = inner_h.saturating_sub(1).max(1);
        let mut start = 0usize;
        if total > max_items {
            if sel_idx >= max_items {
                start = sel_idx + 1 - max_items;
            }
            start = start.min(total.saturating_sub(max_items));
        }
        let end = (start + max_items).min(total);

        for (i, s) in app.suggestions.iter().enumerate().take(end).skip(start) {
            let style = if i == sel_idx {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            s_lines.push(Line::from(vec![
                Span::styled(format!("{: <10}", s.name), style.fg(Color::Yellow)),
                Span::styled(s.help, style.fg(Color::White)),
            ]));
        }
        let sugg =
            Paragraph::new(s_lines).block(Block::default().borders(Borders::TOP | Borders::BOTTOM));
        frame.render_widget(sugg, chunks[3]);
    }

    // Input
    let prompt = app.prompt();
    let buf = &app.input.buf;
    let mut input_spans = vec![
        Span::styled(prompt, Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::raw(buf.as_str()),
    ];
    if buf.is_empty() {
        let hint = match app.mode() {
            UiMode::Control if app.descriptor.is_configured() => "Enter: send draft",
            UiMode::Control => "settings: configure the connection",
            UiMode::Settings => "Enter: edit field  save: persist",
        };
        input_spans.push(Span::styled(
            hint,
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        ));
    }
    let input = Paragraph::new(Line::from(input_spans)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(input, chunks[4]);

    if let Some(m) = &app.modal {
        dim_frame(frame);
        modal::draw_modal(frame, m);
        return;
    }

    let x = prompt.len() as u16 + 1 + app.input.cursor_col() as u16;
    frame.set_cursor_position((chunks[4].x + x, chunks[4].y + 1));
}

fn dim_frame(frame: &mut ratatui::Frame) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.modifier |= Modifier::DIM;
            }
        }
    }
}
