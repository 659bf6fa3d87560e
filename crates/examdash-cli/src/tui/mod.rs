//! Minimal terminal runtime: redraws after every input event.

mod app;
mod event_loop;
mod runner;

pub use self::{app::App, runner::Tui};
