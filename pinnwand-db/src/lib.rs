pub mod client;
pub mod memory;
mod record;
pub mod repository;
