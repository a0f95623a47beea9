use std::sync::mpsc;

use crate::event::LookupEvent;

pub trait Dispatcher {
    fn dispatch(&self, event: LookupEvent);
}

impl Dispatcher for mpsc::Sender<LookupEvent> {
    fn dispatch(&self, event: LookupEvent) {
        let _ = self.send(event);
    }
}
