pub mod discovery;
pub mod errors;
pub mod listing;
pub mod price;
pub mod product;
pub mod rules;
pub(crate) mod utils;
