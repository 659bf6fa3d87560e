use std::io;

use crossterm::event::{self, Event};

#[derive(Debug, Clone)]
pub(super) enum TuiEvent {
    Render,
    Crossterm(Event),
}

/// Alternates between waiting for a terminal event and rendering its effect.
#[derive(Debug)]
pub(super) struct EventLoop {
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self { dirty: true }
    }
}

impl EventLoop {
    /// Returns the next event, blocking until the terminal produces one.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        if self.dirty {
            self.dirty = false;
            return Ok(TuiEvent::Render);
        }
        let event = event::read()?;
        self.dirty = true;
        Ok(TuiEvent::Crossterm(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::default();
        assert!(matches!(events.next().unwrap(), TuiEvent::Render));
    }
}
