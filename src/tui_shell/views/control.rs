use std::any::Any;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use serde_json::Value;
use time::OffsetDateTime;

use crate::dispatch::{DEFAULT_DRAFT, Origin};
use crate::model::{ConnectionDescriptor, StoreEvent};
use crate::tui_shell::{RenderCtx, UiMode, View, render_view_chrome};

pub(in crate::tui_shell) const WAITING_FOR_DATA: &str = "Waiting for data...";

#[derive(Debug)]
pub(in crate::tui_shell) struct ControlView {
    pub(in crate::tui_shell) draft: String,
    /// `Ai` while the draft is an unedited generated command.
    pub(in crate::tui_shell) draft_origin: Origin,
    /// `None` until the first event of the current subscription.
    live: Option<Option<Value>>,
    live_at: Option<OffsetDateTime>,
    pub(in crate::tui_shell) sending: bool,
    pub(in crate::tui_shell) generating: bool,

    pub(in crate::tui_shell) configured: bool,
    pub(in crate::tui_shell) project: String,
    pub(in crate::tui_shell) path: String,
    pub(in crate::tui_shell) connect_note: Option<String>,
}

impl ControlView {
    pub(in crate::tui_shell) fn new() -> Self {
        Self {
            draft: DEFAULT_DRAFT.to_string(),
            draft_origin: Origin::Manual,
            live: None,
            live_at: None,
            sending: false,
            generating: false,
            configured: false,
            project: String::new(),
            path: String::new(),
            connect_note: None,
        }
    }

    pub(in crate::tui_shell) fn show_descriptor(&mut self, descriptor: &ConnectionDescriptor) {
        self.configured = descriptor.is_configured();
        self.project = descriptor.project_id.clone();
        self.path = descriptor.database_path.clone();
    }

    /// Back to waiting; called when the subscription behind the panel is
    /// replaced or released.
    pub(in crate::tui_shell) fn reset_live(&mut self) {
        self.live = None;
        self.live_at = None;
    }

    pub(in crate::tui_shell) fn set_draft(&mut self, draft: String, origin: Origin) {
        self.draft = draft;
        self.draft_origin = origin;
    }

    pub(in crate::tui_shell) fn set_live_value(&mut self, value: Option<Value>, at: OffsetDateTime) {
        self.live = Some(value);
        self.live_at = Some(at);
    }

    /// "Live" once the subscription has delivered anything.
    pub(in crate::tui_shell) fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub(in crate::tui_shell) fn live_text(&self) -> String {
        match &self.live {
            None => WAITING_FOR_DATA.to_string(),
            Some(v) => StoreEvent::display_value(v.as_ref()),
        }
    }

    fn status_text(&self, now: OffsetDateTime) -> String {
        if !self.configured {
            return "not configured".to_string();
        }
        match self.live_at {
            None => "Connecting...".to_string(),
            Some(at) => {
                let secs = (now - at).whole_seconds().max(0);
                if secs < 60 {
                    format!("Live (updated {}s ago)", secs)
                } else {
                    format!("Live (updated {}m ago)", secs / 60)
                }
            }
        }
    }

    fn render_unconfigured(&self, frame: &mut ratatui::Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Configuration Required",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Enter your Firebase project details to connect."),
            Line::from("Use `settings` (or `import <json>` with a pasted config object)."),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
    }
}

impl View for ControlView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn mode(&self) -> UiMode {
        UiMode::Control
    }

    fn title(&self) -> &str {
        "Control"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let status = self.status_text(ctx.now);
        let inner = render_view_chrome(frame, self.title(), &status, area);

        if !self.configured {
            self.render_unconfigured(frame, inner);
            return;
        }

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(5),
                Constraint::Min(0),
            ])
            .split(inner);

        let mut summary = vec![Span::styled("project ", Style::default().fg(Color::Gray))];
        summary.push(Span::raw(if self.project.is_empty() {
            "(unset)"
        } else {
            self.project.as_str()
        }));
        summary.push(Span::styled("  path ", Style::default().fg(Color::Gray)));
        summary.push(Span::raw(self.path.as_str()));
        let mut flags = Vec::new();
        if self.sending {
            flags.push("sending...");
        }
        if self.generating {
            flags.push("generating...");
        }
        if !flags.is_empty() {
            summary.push(Span::raw("  "));
            summary.push(Span::styled(
                flags.join(" "),
                Style::default().fg(Color::Magenta),
            ));
        }
        let mut head = vec![Line::from(summary)];
        if let Some(note) = &self.connect_note {
            head.push(Line::from(Span::styled(
                note.as_str(),
                Style::default().fg(Color::Red),
            )));
        }
        frame.render_widget(Paragraph::new(head), parts[0]);

        frame.render_widget(
            Paragraph::new(self.draft.as_str())
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(match self.draft_origin {
                            Origin::Ai => "Draft from AI (Enter: send; edit: change)",
                            _ => "Draft (Enter: send; edit: change)",
                        }),
                ),
            parts[1],
        );

        let live_style = if self.is_live() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(
            Paragraph::new(self.live_text())
                .style(live_style)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("Live value")),
            parts[2],
        );
    }
}
