mod service;

pub use service::{TimerEvent, TimerService};
