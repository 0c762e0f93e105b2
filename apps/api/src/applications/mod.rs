// Job applications: authenticated, scoped to the applicant.

pub mod handlers;
