pub mod extractor;
pub mod sms;
