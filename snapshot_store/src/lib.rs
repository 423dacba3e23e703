pub mod errors;
pub mod legacy;
pub mod store;
