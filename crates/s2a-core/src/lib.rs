pub mod import;

pub use import::{ImportError, ImportOptions, ImportResult, WishlistImporter};
