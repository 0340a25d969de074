use std::collections::HashMap;

use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum PolicyError {
    /// A `!`-prefixed pattern was meant as an exception marker upstream but
    /// negation was never implemented there. We refuse to load such a pattern
    /// rather than silently treating it as a literal substring.
    #[error("negation patterns are not supported: {0:?} (host {1})")]
    NegationUnsupported(String, String),
}

/// Per-domain list of disallowed URL fragments. This stands in for honoring
/// each site's robots.txt: a URL is blocked when its string form contains any
/// pattern listed for its hostname. Patterns are plain substrings; a `*` in a
/// pattern has no glob meaning and matches only a literal `*`.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    rules: HashMap<String, Vec<String>>,
}

impl AccessPolicy {
    /// Build a policy from (hostname, disallowed fragments) pairs. Hostnames
    /// are normalized the same way lookups are, so `www.bris.se` and
    /// `bris.se` end up in the same bucket.
    pub fn new<H, P>(rules: impl IntoIterator<Item = (H, Vec<P>)>) -> Result<Self, PolicyError>
    where
        H: Into<String>,
        P: Into<String>,
    {
        let mut table: HashMap<String, Vec<String>> = HashMap::new();
        for (host, patterns) in rules {
            let host = normalize_host(&host.into());
            for pattern in patterns {
                let pattern = pattern.into();
                if pattern.starts_with('!') {
                    return Err(PolicyError::NegationUnsupported(pattern, host));
                }
                table.entry(host.clone()).or_default().push(pattern);
            }
        }
        Ok(Self { rules: table })
    }

    /// The static table shipped with the application, mirroring the
    /// robots.txt disallow lists of the configured reference sites.
    pub fn bundled() -> Self {
        let rules: Vec<(&str, Vec<&str>)> = vec![
            (
                "bris.se",
                vec![
                    "/for-barn-och-unga/forum/",
                    "/for-barn-och-unga/mitt-konto",
                    "/for-barn-och-unga/meddelanden",
                    "/for-barn-och-unga/chatt",
                    "/for-barn-och-unga/logga-in",
                    "/for-barn-och-unga/logga-ut",
                    "/natt-pa-bris",
                    "/globalassets/",
                    "/api/chat/isopen",
                    "/api/chat/isfull",
                    "/api/chat/kurator",
                    "/api/misc/info",
                ],
            ),
            ("friends.se", vec!["/wp/wp-admin/"]),
            (
                "rodakorset.se",
                vec![
                    "/episerver/CMS/",
                    "/util/",
                    "/*?timeline=*",
                    "/test/*",
                    "/installningar/*",
                    "/checkout/*",
                ],
            ),
            (
                "1177.se",
                vec!["/episerver/", "/util/", "/modules/", "/error/"],
            ),
            (
                "saffle.se",
                vec![
                    "/imagedescription.action2",
                    "/checkoutimages.action2",
                    "/mybookmarks/addbookmark.action2",
                    "/mybookmarks/removebookmark.action2",
                    "/*.html.printable",
                    "/*?contactPage=*",
                    "/*?contactUserId=*",
                    "/*?sv.state=*",
                    "/*?state=keepAlive",
                    "/*&state=keepAlive",
                    "/*?profiling=*",
                    "/*.pdf?properties=*",
                    "/*?addToCart=true",
                    "/*;jsessionid=*",
                ],
            ),
        ];
        // The bundled table contains no negation patterns, so this cannot fail.
        Self::new(rules).expect("bundled access policy is valid")
    }

    /// Returns the first disallowed pattern the URL's string form contains,
    /// if any. Hostnames absent from the table are unrestricted.
    pub fn disallowed_pattern(&self, url: &Url) -> Option<&str> {
        let host = normalize_host(url.host_str()?);
        let patterns = self.rules.get(&host)?;
        let candidate = url.as_str();
        patterns
            .iter()
            .find(|pattern| candidate.contains(pattern.as_str()))
            .map(String::as_str)
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.to_ascii_lowercase();
    host.strip_prefix("www.").unwrap_or(&host).to_string()
}
