pub mod bestsellers;
pub(crate) mod error_message_erasure;
pub mod items;
pub mod status;
pub mod trigger;
