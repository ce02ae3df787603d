use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommentError {
    #[error("Comment content cannot be empty")]
    EmptyContent,
    #[error("Parent comment {0} not found")]
    ParentNotFound(i64),
    #[error("Parent comment {parent_id} belongs to gbairai {actual}, not {expected}")]
    ParentInOtherGbairai {
        parent_id: i64,
        expected: i64,
        actual: i64,
    },
}
