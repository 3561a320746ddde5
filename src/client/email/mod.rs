//! Order e-mails
pub mod address;
pub mod payment;
pub mod summary;

pub use address::format_address;
pub use payment::PaymentEmail;
pub use summary::EmailSummary;
