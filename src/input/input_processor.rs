use crate::{event::LookupEvent, ui::StatefulWidgets};

pub trait InputProcessor {
    fn apply(&mut self, event: &LookupEvent, ui: &mut StatefulWidgets);

    fn on_pop(&self);
    fn on_push(&self);
}
