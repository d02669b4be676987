//! Contact form
//!
//! - `delivery`     — the email-delivery collaborator seam and form snapshots
//! - `notification` — single toast with enter/auto-dismiss/exit timing
//! - `submission`   — submit lifecycle with guaranteed button restore

pub mod delivery;
pub mod notification;
pub mod submission;

pub use delivery::{DeliveryError, DeliveryReceipt, EmailDelivery, FormData};
pub use notification::{NotificationCenter, NotificationKind, NotificationTask};
pub use submission::{SubmissionFlow, SubmissionState};
