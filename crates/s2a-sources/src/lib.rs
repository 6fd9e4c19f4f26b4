pub mod allkeyshop;
pub mod error;
pub mod http;
pub mod report;
pub mod steam;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use allkeyshop::AllKeyShopClient;
pub use error::SourceError;
pub use http::{HttpResponse, PageFetcher, ReqwestFetcher, SessionCookie};
pub use report::{FailureStage, ImportFailure, ImportReport};
pub use steam::SteamClient;
pub use traits::{CatalogSource, TargetSink};
