//! Sliding History Window
//!
//! Provides a fixed-capacity, newest-first window used by the estimation
//! filters to keep their recent raw and filtered samples.

mod window;

pub use window::HistoryWindow;
