// Candidate profiles: authenticated, scoped to the owning user.

pub mod handlers;
pub mod queries;
