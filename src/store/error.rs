//! Store errors

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The store is sealed, or there is no checkpoint to restore
    #[error("NO TRANSACTION")]
    NoActiveTransaction,
}

pub type Result<T> = std::result::Result<T, StoreError>;
