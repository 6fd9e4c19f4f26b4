pub mod api;
pub mod client;
pub mod parser;

pub use client::AllKeyShopClient;
pub use parser::{make_slug, PagePatterns};
