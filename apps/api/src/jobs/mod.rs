// Job listings: filtered public reads, authenticated writes.

pub mod filter;
pub mod handlers;
pub mod queries;
