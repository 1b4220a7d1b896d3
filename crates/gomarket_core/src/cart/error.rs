//! Cart error taxonomy.

use crate::model::line_item::LineItemValidationError;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CartResult<T> = Result<T, CartError>;

#[derive(Debug)]
pub enum CartError {
    /// Cart accessed before its provider was mounted.
    ProviderMissing,
    AlreadyMounted,
    Validation(LineItemValidationError),
    Storage(StorageError),
    Serialization(serde_json::Error),
    /// A previous holder of the cart lock panicked.
    Poisoned,
}

impl Display for CartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProviderMissing => write!(f, "use_cart must be used within a CartProvider"),
            Self::AlreadyMounted => write!(f, "cart provider is already mounted"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "cart storage failed: {err}"),
            Self::Serialization(err) => write!(f, "cart serialization failed: {err}"),
            Self::Poisoned => write!(f, "cart state lock poisoned"),
        }
    }
}

impl Error for CartError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::ProviderMissing | Self::AlreadyMounted | Self::Poisoned => None,
        }
    }
}

impl From<LineItemValidationError> for CartError {
    fn from(value: LineItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for CartError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for CartError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}
