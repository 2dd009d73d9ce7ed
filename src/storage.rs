pub mod inquiry_log;

pub use inquiry_log::{InquirerRow, InquiryLog, InteractionRow};
