// Normalized lookup tables: industries, job types, locations, job categories
// and the canonical skill set.

pub mod handlers;
pub mod skills;
