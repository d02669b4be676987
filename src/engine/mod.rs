//! Page runtime
//!
//! - `scheduler` — virtual-clock timer queue
//! - `observer`  — intersection observation against the viewport
//! - `page`      — composes the behavior components over one document

pub mod observer;
pub mod page;
pub mod scheduler;

pub use page::{ClickOutcome, Page, PageError, Task};
