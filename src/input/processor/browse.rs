use std::sync::mpsc::Sender;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    dispatcher::Dispatcher, event::LookupEvent, input::InputProcessor, pagination::PageSize,
    ui::StatefulWidgets,
};

/// Key bindings while the query field is not focused.
pub struct BrowseProcessor {
    sender: Sender<LookupEvent>,
}

impl BrowseProcessor {
    pub fn new(sender: Sender<LookupEvent>) -> Self {
        Self { sender }
    }

    fn process(&self, event: &KeyEvent) {
        if let Some(e) = Self::map_key(event) {
            self.dispatch(e)
        }
    }

    fn map_key(event: &KeyEvent) -> Option<LookupEvent> {
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(LookupEvent::AppExit)
            },
            KeyCode::Enter => Some(LookupEvent::LookupSubmit),
            KeyCode::Char('/') => Some(LookupEvent::QueryEditOpen),
            KeyCode::Char('e') => Some(LookupEvent::QueryEditOpen),
            KeyCode::Char('1') => Some(LookupEvent::PageSizeSet(PageSize::Ten)),
            KeyCode::Char('2') => Some(LookupEvent::PageSizeSet(PageSize::Fifty)),
            KeyCode::Char('3') => Some(LookupEvent::PageSizeSet(PageSize::Hundred)),
            KeyCode::Char('s') => Some(LookupEvent::PageSizeCycle),
            KeyCode::Right => Some(LookupEvent::PageNext),
            KeyCode::Left => Some(LookupEvent::PagePrevious),
            KeyCode::Char('n') => Some(LookupEvent::PageNext),
            KeyCode::Char('p') => Some(LookupEvent::PagePrevious),
            KeyCode::Up => Some(LookupEvent::RepositoryPrevious),
            KeyCode::Down => Some(LookupEvent::RepositoryNext),
            KeyCode::Char('k') => Some(LookupEvent::RepositoryPrevious),
            KeyCode::Char('j') => Some(LookupEvent::RepositoryNext),
            KeyCode::Char('o') => Some(LookupEvent::ProfileOpenUrl),
            KeyCode::Char('w') => Some(LookupEvent::RepositoryOpenUrl),
            KeyCode::Char('q') => Some(LookupEvent::AppExit),
            _ => None,
        }
    }
}

impl InputProcessor for BrowseProcessor {
    fn apply(&mut self, event: &LookupEvent, _ui: &mut StatefulWidgets) {
        if let LookupEvent::InputKey(e) = event {
            self.process(e)
        }
    }

    fn on_pop(&self) {}
    fn on_push(&self) {}
}

impl Dispatcher for BrowseProcessor {
    fn dispatch(&self, event: LookupEvent) {
        self.sender.dispatch(event)
    }
}
