// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The flags are deliberately short and Go-style so existing pipelines keep
// working:
//
//   cat urls.txt | link-harvester -t 10 -d 3 -subs -h "Cookie: a=b"
//
// clap only understands single-dash flags of one letter, so the long ones
// written with one dash (-insecure, -subs, ...) are rewritten to the
// double-dash form before parsing. Note that -h is the headers flag, which
// is why help lives on --help only.
// =============================================================================

use std::ffi::OsString;
use std::time::Duration;

use clap::{ArgAction, Parser};

use link_harvester::CrawlRequest;

#[derive(Parser, Debug)]
#[command(
    name = "link-harvester",
    version = "0.1.0",
    about = "Crawl sites from seed URLs on stdin and print every link, script and form action found",
    long_about = "link-harvester reads one seed URL per line from stdin and crawls each site \
                  breadth-first, printing every unique absolute URL it discovers.",
    disable_help_flag = true
)]
pub struct Cli {
    /// Number of concurrent requests per crawl
    #[arg(short = 't', value_name = "THREADS", default_value_t = 5, value_parser = parse_threads)]
    pub threads: usize,

    /// Depth to crawl (0 = only the seed page)
    #[arg(short = 'd', value_name = "DEPTH", default_value_t = 2)]
    pub depth: usize,

    /// Disable TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Include subdomains of the seed host in the crawl scope
    #[arg(long)]
    pub subs: bool,

    /// Custom headers separated by two semicolons,
    /// e.g. -h "Cookie: foo=bar;;Referer: http://example.com/"
    #[arg(short = 'h', value_name = "HEADERS", default_value = "")]
    pub headers: String,

    /// Per-request timeout in seconds (default: no timeout)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print one JSON object per seed instead of one URL per line
    #[arg(long)]
    pub json: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl Cli {
    /// Builds the crawl parameters for one seed line.
    pub fn request_for(&self, seed: &str) -> CrawlRequest {
        CrawlRequest {
            seed: seed.to_string(),
            threads: self.threads,
            max_depth: self.depth,
            include_subdomains: self.subs,
            skip_tls_verify: self.insecure,
            raw_headers: self.headers.clone(),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

const SINGLE_DASH_LONG_FLAGS: [&str; 4] = ["insecure", "subs", "json", "timeout"];

/// Rewrites `-insecure` style flags (and `-timeout=5`) to `--insecure`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else { return arg };
            let Some(flag) = text.strip_prefix('-') else { return arg };
            let name = flag.split('=').next().unwrap_or(flag);

            if !flag.starts_with('-') && SINGLE_DASH_LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{}", text))
            } else {
                arg
            }
        })
        .collect()
}

fn parse_threads(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(normalize_args(args.iter().map(OsString::from)))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["link-harvester"]).unwrap();
        assert_eq!(cli.threads, 5);
        assert_eq!(cli.depth, 2);
        assert!(!cli.insecure);
        assert!(!cli.subs);
        assert_eq!(cli.headers, "");
        assert_eq!(cli.timeout, None);
        assert!(!cli.json);
    }

    #[test]
    fn test_go_style_flags() {
        let cli = parse(&[
            "link-harvester", "-t", "10", "-d", "3", "-insecure", "-subs", "-h",
            "Cookie: a=b;;Referer: http://x/", "-timeout=7",
        ])
        .unwrap();
        assert_eq!(cli.threads, 10);
        assert_eq!(cli.depth, 3);
        assert!(cli.insecure);
        assert!(cli.subs);
        assert_eq!(cli.headers, "Cookie: a=b;;Referer: http://x/");
        assert_eq!(cli.timeout, Some(7));
    }

    #[test]
    fn test_double_dash_flags_still_work() {
        let cli = parse(&["link-harvester", "--insecure", "--json"]).unwrap();
        assert!(cli.insecure);
        assert!(cli.json);
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(parse(&["link-harvester", "-t", "0"]).is_err());
    }

    #[test]
    fn test_rewrite_only_touches_known_names() {
        let args = normalize_args(["-h", "-subs"].iter().map(OsString::from));
        assert_eq!(args[1], OsString::from("--subs"));
        let args = normalize_args(["-t", "-insecurex"].iter().map(OsString::from));
        assert_eq!(args[1], OsString::from("-insecurex"));
    }

    #[test]
    fn test_request_for_seed() {
        let cli = parse(&["link-harvester", "-d", "0", "-subs", "-timeout", "3"]).unwrap();
        let request = cli.request_for("example.com");
        assert_eq!(request.seed, "example.com");
        assert_eq!(request.max_depth, 0);
        assert!(request.include_subdomains);
        assert_eq!(request.timeout, Some(Duration::from_secs(3)));
    }
}
