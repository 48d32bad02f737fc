use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitstatError>;

#[derive(Error, Debug)]
pub enum GitstatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("No commits recorded; run the analysis on a non-empty history first")]
    EmptyHistory,
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
}

impl From<gix::object::find::existing::Error> for GitstatError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        GitstatError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for GitstatError {
    fn from(err: gix::object::commit::Error) -> Self {
        GitstatError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for GitstatError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        GitstatError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for GitstatError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        GitstatError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for GitstatError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        GitstatError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for GitstatError {
    fn from(err: gix::objs::decode::Error) -> Self {
        GitstatError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for GitstatError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        GitstatError::DiffTreeToTree(Box::new(err))
    }
}

impl From<gix::discover::Error> for GitstatError {
    fn from(err: gix::discover::Error) -> Self {
        GitstatError::GitDiscover(Box::new(err))
    }
}
