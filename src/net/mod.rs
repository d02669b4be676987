pub mod emailjs;

pub use emailjs::{ClientError, EmailJsClient};
