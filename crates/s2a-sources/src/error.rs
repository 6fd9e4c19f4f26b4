use s2a_config::StoreError;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request error for {url}: {message}")]
    Request { url: String, message: String },

    #[error("URL: {url} - status code error: {status}")]
    Status { url: String, status: u16 },

    #[error("error decoding JSON: {0}")]
    Decode(String),

    #[error("no games found")]
    NoItems,

    #[error("{0} cannot be empty")]
    EmptyValue(&'static str),

    #[error("couldn't find productId for {slug}")]
    ProductIdNotFound { slug: String },

    #[error("couldn't convert productId '{value}' to int: {source}")]
    InvalidProductId {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("couldn't find your wishlist")]
    WishlistNotFound,

    #[error("error converting wishlist ID '{value}' to int: {source}")]
    InvalidWishlistId {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid page pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SourceError {
    /// Errors after which no further progress can be recorded
    pub fn is_fatal(&self) -> bool {
        matches!(self, SourceError::Store(_))
    }
}
