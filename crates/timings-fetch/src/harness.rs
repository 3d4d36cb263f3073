//! Harness selection and filename classification.
//!
//! Filenames decide how a request is resolved:
//! - `index.json` → generic, harness taken from the page's `kind` parameter
//! - `mochitest-*` → mochitest harness
//! - `xpcshell-try-<40 hex>.json` / `mochitest-try-<40 hex>.json` → try revision
//! - anything else → xpcshell harness

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Generic index file, resolved with the page's `kind` parameter.
pub const INDEX_FILENAME: &str = "index.json";

/// Prefix of try filenames that may fall back to mochitest data.
pub const XPCSHELL_TRY_PREFIX: &str = "xpcshell-try-";

static TRY_REVISION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(xpcshell|mochitest)-try-([0-9a-f]{40})\.json$").expect("valid try pattern")
});

/// A test harness whose timing data can be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Harness {
    Xpcshell,
    Mochitest,
}

impl Harness {
    /// Harness name as used in filenames and CI routes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xpcshell => "xpcshell",
            Self::Mochitest => "mochitest",
        }
    }

    /// Suffix of the CI job type that uploads this harness's timings.
    pub fn timings_job_suffix(&self) -> &'static str {
        match self {
            Self::Xpcshell => "xpcshell-timings-rev",
            Self::Mochitest => "mochitest-timings-rev",
        }
    }
}

impl fmt::Display for Harness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Harness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xpcshell" => Ok(Self::Xpcshell),
            "mochitest" => Ok(Self::Mochitest),
            other => Err(format!("unknown harness: {}", other)),
        }
    }
}

/// Pick the harness for a filename.
///
/// `kind` is the page's `kind` parameter and only matters for `index.json`.
pub fn select_harness(filename: &str, kind: Option<&str>) -> Harness {
    if filename.starts_with("mochitest-") {
        return Harness::Mochitest;
    }

    if filename == INDEX_FILENAME {
        if let Some(kind) = kind.filter(|k| !k.is_empty()) {
            return kind.parse().unwrap_or_else(|_| {
                warn!(kind, "unknown kind parameter, using xpcshell");
                Harness::Xpcshell
            });
        }
    }

    Harness::Xpcshell
}

/// A `<harness>-try-<revision>.json` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryRevision {
    pub harness: Harness,
    /// 40-character lowercase hex changeset id.
    pub revision: String,
}

impl TryRevision {
    /// Match a filename against the try-revision pattern.
    ///
    /// ```
    /// use timings_fetch::{Harness, TryRevision};
    ///
    /// let rev = "0123456789abcdef0123456789abcdef01234567";
    /// let parsed = TryRevision::parse(&format!("xpcshell-try-{}.json", rev)).unwrap();
    /// assert_eq!(parsed.harness, Harness::Xpcshell);
    /// assert_eq!(parsed.revision, rev);
    ///
    /// assert!(TryRevision::parse("xpcshell-try-abc.json").is_none());
    /// ```
    pub fn parse(filename: &str) -> Option<Self> {
        let captures = TRY_REVISION.captures(filename)?;
        let harness = captures.get(1)?.as_str().parse().ok()?;
        let revision = captures.get(2)?.as_str().to_string();
        Some(Self { harness, revision })
    }
}

/// Rewrite a leading `xpcshell-` to `mochitest-`.
pub fn to_mochitest_filename(filename: &str) -> String {
    match filename.strip_prefix("xpcshell-") {
        Some(rest) => format!("mochitest-{}", rest),
        None => filename.to_string(),
    }
}
