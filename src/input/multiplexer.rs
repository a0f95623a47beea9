use std::sync::mpsc::Sender;

use crate::{
    event::LookupEvent,
    input::{InputProcessor, processor::QueryEditProcessor},
    ui::StatefulWidgets,
};

/// Stack of input processors; only the topmost one sees key presses.
pub struct InputMultiplexer {
    sender: Sender<LookupEvent>,
    processors: Vec<Box<dyn InputProcessor>>,
}

impl InputMultiplexer {
    pub fn new(sender: Sender<LookupEvent>) -> Self {
        Self { sender, processors: Vec::new() }
    }

    pub fn push(&mut self, processor: Box<dyn InputProcessor>) {
        self.processors.push(processor);
        if let Some(processor) = self.processors.last() {
            processor.on_push()
        }
    }

    pub fn pop_processor(&mut self) {
        // the browse processor stays at the bottom
        if self.processors.len() <= 1 {
            return;
        }
        if let Some(processor) = self.processors.last() {
            processor.on_pop();
        }
        self.processors.pop();
    }

    pub fn apply(&mut self, event: &LookupEvent, ui: &mut StatefulWidgets) {
        match event {
            LookupEvent::QueryEditOpen if !ui.query_editing => {
                self.push(Box::new(QueryEditProcessor::new(self.sender.clone())));
            },
            LookupEvent::QueryEditClose if ui.query_editing => self.pop_processor(),
            _ => (),
        }

        if let Some(processor) = self.processors.last_mut() {
            processor.apply(event, ui)
        }
    }
}
