pub mod browser;
pub mod errors;
pub mod remote;
pub mod request;
pub mod traits;
