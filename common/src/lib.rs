pub mod constants;
pub mod record;
pub mod snapshot;
