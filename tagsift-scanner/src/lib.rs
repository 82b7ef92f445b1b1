pub mod browser;
pub mod classify;
pub mod error;
pub mod extract;
pub mod resolve;
pub mod rules;
pub mod util;

pub use browser::{HeadlessVisitor, SiteVisitor};
pub use classify::classify_requests;
pub use error::ScrapeError;
pub use extract::extract_script_urls;
pub use rules::ExtractionRules;
