//! Per-author contribution statistics and a gap-filled commit activity
//! series, computed by diffing every non-merge commit of a repository in
//! parallel.

pub mod analyze;
pub mod authors;
pub mod cli;
pub mod diff;
pub mod error;
pub mod git;
pub mod logging;
pub mod model;
pub mod source;
pub mod timeline;
pub mod util;

pub use analyze::{CommitStore, RepositoryAnalyzer};
pub use error::{GitstatError, Result};
pub use source::CommitSource;
