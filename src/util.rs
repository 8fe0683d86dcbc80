#[cfg(feature = "time")]
pub mod event_log;
