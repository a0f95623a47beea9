use std::sync::mpsc::Sender;

use compact_str::ToCompactString;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_input::InputRequest;

use crate::{
    dispatcher::Dispatcher, event::LookupEvent, input::InputProcessor, ui::StatefulWidgets,
};

/// Routes key presses into the username field until Enter or Esc.
pub struct QueryEditProcessor {
    sender: Sender<LookupEvent>,
}

impl QueryEditProcessor {
    pub fn new(sender: Sender<LookupEvent>) -> Self {
        Self { sender }
    }

    fn process(&self, event: &KeyEvent, ui: &mut StatefulWidgets) {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let request = match event.code {
            KeyCode::Char('c') if ctrl => return self.dispatch(LookupEvent::AppExit),
            KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
            KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
            KeyCode::Enter => {
                self.dispatch(LookupEvent::LookupSubmit);
                return self.dispatch(LookupEvent::QueryEditClose);
            },
            KeyCode::Esc => return self.dispatch(LookupEvent::QueryEditClose),
            KeyCode::Char(c) => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return,
        };

        if ui
            .query_input
            .handle(request)
            .is_some_and(|changed| changed.value)
        {
            self.dispatch(LookupEvent::QueryChanged(
                ui.query_input.value().to_compact_string(),
            ));
        }
    }
}

impl InputProcessor for QueryEditProcessor {
    fn apply(&mut self, event: &LookupEvent, ui: &mut StatefulWidgets) {
        if let LookupEvent::InputKey(e) = event {
            self.process(e, ui)
        }
    }

    fn on_pop(&self) {}
    fn on_push(&self) {}
}

impl Dispatcher for QueryEditProcessor {
    fn dispatch(&self, event: LookupEvent) {
        self.sender.dispatch(event)
    }
}
