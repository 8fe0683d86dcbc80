use std::time::Duration;

pub const RESET: &str = "\x1b[0m";
pub const BLUE: &str = "\x1b[34m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const MAGENTA: &str = "\x1b[35m";

#[derive(Debug)]
pub enum Event {
    TotalElapsed,
    ParseChunks,
    Inflate,
    Reconstruct,
}

impl Event {
    const fn color(&self) -> &'static str {
        match self {
            Self::TotalElapsed => YELLOW,
            Self::ParseChunks => MAGENTA,
            Self::Inflate => GREEN,
            Self::Reconstruct => BLUE,
        }
    }
}

pub fn log_event(msg: &str, event: Event, duration: Option<Duration>) {
    if let Some(duration) = duration {
        log::info!("{}{:?}\t{:?}\t{}{}", event.color(), duration, event, msg, RESET);
    } else {
        log::info!("{}{:?}\t{}{}", event.color(), event, msg, RESET);
    }
}
