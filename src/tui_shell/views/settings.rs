use std::any::Any;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::model::{ConnectionDescriptor, DescriptorField};
use crate::tui_shell::{RenderCtx, UiMode, View, render_view_chrome};

/// Editable copy of the descriptor; nothing reaches the session until `save`.
#[derive(Debug)]
pub(in crate::tui_shell) struct SettingsView {
    pub(in crate::tui_shell) form: ConnectionDescriptor,
    pub(in crate::tui_shell) selected: usize,
    pub(in crate::tui_shell) dirty: bool,
}

impl SettingsView {
    pub(in crate::tui_shell) fn new(form: ConnectionDescriptor) -> Self {
        Self {
            form,
            selected: 0,
            dirty: false,
        }
    }

    pub(in crate::tui_shell) fn selected_field(&self) -> DescriptorField {
        DescriptorField::ALL[self.selected.min(DescriptorField::ALL.len() - 1)]
    }

    pub(in crate::tui_shell) fn set_field(&mut self, field: DescriptorField, value: String) {
        self.form.set(field, value);
        self.dirty = true;
    }

    pub(in crate::tui_shell) fn replace_form(&mut self, form: ConnectionDescriptor) {
        self.form = form;
        self.dirty = true;
    }
}

fn masked(value: &str) -> String {
    if value.is_empty() {
        return "(empty)".to_string();
    }
    let tail: String = value
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", tail)
}

fn row_value(form: &ConnectionDescriptor, field: DescriptorField) -> String {
    let v = form.get(field);
    if field.is_secret() {
        masked(v)
    } else if v.is_empty() {
        "(empty)".to_string()
    } else {
        v.to_string()
    }
}

impl View for SettingsView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn mode(&self) -> UiMode {
        UiMode::Settings
    }

    fn title(&self) -> &str {
        "Settings"
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self) {
        let max = DescriptorField::ALL.len().saturating_sub(1);
        self.selected = (self.selected + 1).min(max);
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, _ctx: &RenderCtx) {
        let subtitle = if self.dirty { "unsaved changes" } else { "" };
        let inner = render_view_chrome(frame, self.title(), subtitle, area);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(inner);

        let rows: Vec<ListItem> = DescriptorField::ALL
            .iter()
            .map(|&f| ListItem::new(format!("{: <20} {}", f.label(), row_value(&self.form, f))))
            .collect();
        let mut state = ListState::default();
        state.select(Some(self.selected.min(DescriptorField::ALL.len() - 1)));
        let list = List::new(rows)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .title("(Enter: edit; save: persist + reconnect; /: commands)"),
            )
            .highlight_style(Style::default().bg(Color::DarkGray));
        frame.render_stateful_widget(list, parts[0], &mut state);

        let field = self.selected_field();
        let detail = vec![
            Line::from(format!("{} ({})", field.label(), field.key())),
            Line::from(format!("set {} <value>", field.key())),
        ];
        frame.render_widget(
            Paragraph::new(detail).wrap(Wrap { trim: false }),
            parts[1],
        );
    }
}
