use std::fmt;

/// Canonical fetch descriptor produced by resolving a caller-supplied locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSource {
    /// A bucket-relative object, fetched through the storage gateway.
    Object { bucket: String, path: String },
    /// A URL fetched directly. Also carries URLs the grammar did not
    /// recognize; those surface as a download failure downstream rather
    /// than being rejected here.
    Url(String),
}

impl ResolvedSource {
    pub fn object(bucket: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Object {
            bucket: bucket.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for ResolvedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object { bucket, path } => write!(f, "{}/{}", bucket, path),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Resolver for raw-file locators.
///
/// Accepted forms:
/// - a bare path relative to the raw bucket (`clip1/a.webm`)
/// - a path that redundantly repeats the raw bucket name (`raw/clip1/a.webm`)
/// - a storage URL of the form `.../object/(sign|raw)/<bucket>/<path>[?query]`
#[derive(Debug, Clone)]
pub struct SourceLocator {
    raw_bucket: String,
}

impl SourceLocator {
    pub fn new(raw_bucket: impl Into<String>) -> Self {
        Self {
            raw_bucket: raw_bucket.into(),
        }
    }

    /// Normalize a locator into a canonical fetch descriptor.
    ///
    /// Resolving an already-canonical path is a no-op.
    pub fn resolve(&self, locator: &str) -> ResolvedSource {
        if has_url_scheme(locator) {
            return match parse_object_url(locator) {
                Some((bucket, path)) => ResolvedSource::Object { bucket, path },
                None => ResolvedSource::Url(locator.to_string()),
            };
        }

        let prefix = format!("{}/", self.raw_bucket);
        let path = match locator.strip_prefix(&prefix) {
            Some(rest) => rest,
            None => locator,
        };

        ResolvedSource::Object {
            bucket: self.raw_bucket.clone(),
            path: path.to_string(),
        }
    }
}

fn has_url_scheme(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

/// Extract `(bucket, path)` from `.../object/(sign|raw)/<bucket>/<path>[?query]`.
///
/// The trailing query string is discarded. Returns `None` when the URL does
/// not match the grammar.
fn parse_object_url(url: &str) -> Option<(String, String)> {
    let without_query = url.split('?').next().unwrap_or(url);

    let rest = without_query
        .split_once("/object/")
        .map(|(_, rest)| rest)?;

    let (mode, rest) = rest.split_once('/')?;
    if mode != "sign" && mode != "raw" {
        return None;
    }

    let (bucket, path) = rest.split_once('/')?;
    if bucket.is_empty() || path.is_empty() {
        return None;
    }

    Some((bucket.to_string(), path.to_string()))
}
