pub mod edits;
pub mod repo;

pub use edits::line_edits;
pub use repo::GitRepo;
