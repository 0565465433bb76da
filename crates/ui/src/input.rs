use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputEvent {
    Edited,
    Submitted,
    Cancelled,
    Ignored,
}

/// Controlled single-line text field.
#[derive(Debug, Clone, Default)]
pub(crate) struct TextInput {
    pub(crate) value: String,
    pub(crate) focused: bool,
}

impl TextInput {
    pub(crate) fn focus(&mut self) {
        self.focused = true;
    }

    pub(crate) fn blur(&mut self) {
        self.focused = false;
    }

    pub(crate) fn clear(&mut self) {
        self.value.clear();
    }

    /// Trimmed value, if anything but whitespace was typed.
    pub(crate) fn submitted(&self) -> Option<&str> {
        let value = self.value.trim();
        (!value.is_empty()).then_some(value)
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> InputEvent {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('u') => {
                    self.value.clear();
                    InputEvent::Edited
                }
                _ => InputEvent::Ignored,
            };
        }

        match key.code {
            KeyCode::Esc => {
                self.blur();
                InputEvent::Cancelled
            }
            KeyCode::Enter => InputEvent::Submitted,
            KeyCode::Backspace => {
                self.value.pop();
                InputEvent::Edited
            }
            KeyCode::Char(ch) => {
                self.value.push(ch);
                InputEvent::Edited
            }
            _ => InputEvent::Ignored,
        }
    }
}
