// Saved jobs (bookmarks): authenticated, scoped to the owning user.

pub mod handlers;
