use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument, warn};

use crate::fetcher::{
    errors::FetchError,
    extract::{ExtractionRules, HtmlTextExtractor, SelectorExtractor},
    policy::AccessPolicy,
};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REDIRECTS: usize = 5;

/// Fetches one reference page: access-policy check, a single GET with bounded
/// redirects and timeout, UTF-8 decode, selector-based text extraction, trim.
/// No retries, no caching; one error per call.
pub struct Fetcher {
    http: Client,
    policy: AccessPolicy,
    rules: ExtractionRules,
    extractor: Box<dyn HtmlTextExtractor>,
}

impl Fetcher {
    pub fn new(policy: AccessPolicy, rules: ExtractionRules) -> Self {
        FetcherBuilder::new(policy, rules).build()
    }

    pub fn builder(policy: AccessPolicy, rules: ExtractionRules) -> FetcherBuilder {
        FetcherBuilder::new(policy, rules)
    }

    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed_url = url::Url::parse(url)?;

        // Policy check runs before any I/O.
        if let Some(pattern) = self.policy.disallowed_pattern(&parsed_url) {
            return Err(FetchError::AccessDenied {
                url: parsed_url.to_string(),
                pattern: pattern.to_string(),
            });
        }

        let response = self
            .http
            .get(parsed_url.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http { status });
        }

        // Raw bytes rather than reqwest's own text decoding, so the charset
        // handling stays explicit.
        let body_bytes = response
            .bytes()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        // UTF-8 only. A mis-encoded source comes out mangled instead of
        // failing; there is no charset sniffing here.
        let (body, _, had_errors) = encoding_rs::UTF_8.decode(&body_bytes);
        if had_errors {
            warn!(url = %parsed_url, "body is not valid utf-8, decoded lossily");
        }
        debug!(url = %parsed_url, body = %body, "raw fetched body");

        let content = match parsed_url
            .host_str()
            .and_then(|host| self.rules.selectors_for(host))
        {
            Some(selectors) => self.extractor.extract_text(&body, selectors),
            // Unconfigured hosts extract to nothing; that is a successful
            // fetch, not an error.
            None => String::new(),
        };

        let preview: String = content.chars().take(200).collect();
        debug!(url = %parsed_url, preview = %preview, "extracted content");

        Ok(content.trim().to_string())
    }
}

pub struct FetcherBuilder {
    policy: AccessPolicy,
    rules: ExtractionRules,
    extractor: Box<dyn HtmlTextExtractor>,
    timeout: Duration,
    max_redirects: usize,
}

impl FetcherBuilder {
    fn new(policy: AccessPolicy, rules: ExtractionRules) -> Self {
        Self {
            policy,
            rules,
            extractor: Box::new(SelectorExtractor),
            timeout: FETCH_TIMEOUT,
            max_redirects: MAX_REDIRECTS,
        }
    }

    /// Overall request timeout. Tests shorten this; production keeps 30s.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn extractor(mut self, extractor: impl HtmlTextExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn build(self) -> Fetcher {
        let http = ClientBuilder::new()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(self.max_redirects))
            .build()
            .expect("failed to build HTTP client");
        Fetcher {
            http,
            policy: self.policy,
            rules: self.rules,
            extractor: self.extractor,
        }
    }
}
