use crate::model::DescriptorField;

use super::Input;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum UiMode {
    Control,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) struct CommandDef {
    pub(in crate::tui_shell) name: &'static str,
    pub(in crate::tui_shell) aliases: &'static [&'static str],
    pub(in crate::tui_shell) usage: &'static str,
    pub(in crate::tui_shell) help: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum TextInputAction {
    EditField(DescriptorField),
    ImportConfig,
    EditDraft,
    AiPrompt,
    TextMessage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum ModalKind {
    Viewer,
    /// Inline error; closes on any key.
    Alert,
    TextInput {
        prompt: String,
        action: TextInputAction,
    },
}

#[derive(Debug)]
pub(in crate::tui_shell) struct Modal {
    pub(in crate::tui_shell) title: String,
    pub(in crate::tui_shell) lines: Vec<String>,
    pub(in crate::tui_shell) scroll: usize,
    pub(in crate::tui_shell) kind: ModalKind,
    pub(in crate::tui_shell) input: Input,
}
