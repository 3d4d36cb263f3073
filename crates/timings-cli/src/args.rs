use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "timings-fetch",
    version,
    about = "Resolve and fetch a test-timing data file the way the dashboard does"
)]
pub struct Cli {
    /// Data file to fetch (e.g. index.json, xpcshell-try-<rev>.json)
    pub filename: String,

    /// Dashboard page URL; https selects CI resolution, anything else local data/
    #[arg(long, env = "TIMINGS_PAGE_URL", default_value = "https://localhost/")]
    pub page_url: String,

    /// Harness for index.json (overrides the page's kind parameter)
    #[arg(long)]
    pub kind: Option<String>,

    #[arg(long, env = "TIMINGS_TREEHERDER_URL")]
    pub treeherder_url: Option<String>,

    #[arg(long, env = "TIMINGS_QUEUE_URL")]
    pub queue_url: Option<String>,

    #[arg(long, env = "TIMINGS_INDEX_URL")]
    pub index_url: Option<String>,

    /// Page host that reads from the try repository
    #[arg(long, env = "TIMINGS_PUBLIC_DEMO_HOST")]
    pub public_demo_host: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout", env = "TIMINGS_REQUEST_TIMEOUT")]
    pub timeout_secs: Option<u64>,

    /// Print the body without pretty-printing
    #[arg(long)]
    pub raw: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["timings-fetch", "index.json"]).unwrap();
        assert_eq!(cli.filename, "index.json");
        assert!(cli.kind.is_none());
        assert!(!cli.raw);
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "timings-fetch",
            "index.json",
            "--page-url",
            "http://localhost:8000/",
            "--kind",
            "mochitest",
            "--timeout",
            "5",
            "--raw",
        ])
        .unwrap();
        assert_eq!(cli.page_url, "http://localhost:8000/");
        assert_eq!(cli.kind.as_deref(), Some("mochitest"));
        assert_eq!(cli.timeout_secs, Some(5));
        assert!(cli.raw);
    }
}
