// Company directory: read-only public endpoints.

pub mod handlers;
pub mod queries;
