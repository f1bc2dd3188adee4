use std::any::Any;

use super::*;

impl App {
    pub(super) fn mode(&self) -> UiMode {
        self.frames
            .last()
            .map(|f| f.view.mode())
            .unwrap_or(UiMode::Control)
    }

    pub(super) fn view(&self) -> Option<&dyn View> {
        self.frames.last().map(|f| f.view.as_ref())
    }

    pub(super) fn view_mut(&mut self) -> Option<&mut dyn View> {
        self.frames.last_mut().map(|f| f.view.as_mut())
    }

    pub(in crate::tui_shell) fn current_view_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.frames
            .last_mut()
            .and_then(|f| f.view.as_any_mut().downcast_mut::<T>())
    }

    pub(in crate::tui_shell) fn current_view<T: Any>(&self) -> Option<&T> {
        self.frames
            .last()
            .and_then(|f| f.view.as_any().downcast_ref::<T>())
    }

    /// The control view stays at the bottom of the stack, so background
    /// results land on it even while settings are open.
    pub(super) fn control(&self) -> Option<&ControlView> {
        self.frames
            .first()
            .and_then(|f| f.view.as_any().downcast_ref::<ControlView>())
    }

    pub(super) fn control_mut(&mut self) -> Option<&mut ControlView> {
        self.frames
            .first_mut()
            .and_then(|f| f.view.as_any_mut().downcast_mut::<ControlView>())
    }

    pub(super) fn push_view<V: View>(&mut self, view: V) {
        self.frames.push(ViewFrame {
            view: Box::new(view),
        });
    }

    pub(super) fn pop_mode(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub(super) fn prompt(&self) -> &'static str {
        match self.mode() {
            UiMode::Control => "iot>",
            UiMode::Settings => "settings>",
        }
    }
}
