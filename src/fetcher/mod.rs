pub mod client;
pub mod errors;
pub mod extract;
pub mod policy;
pub mod sources;

pub use client::{Fetcher, FetcherBuilder};
pub use errors::FetchError;
pub use extract::{ExtractionRules, HtmlTextExtractor, RuleError, SelectorExtractor};
pub use policy::{AccessPolicy, PolicyError};
pub use sources::collect_reference_text;
