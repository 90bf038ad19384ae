// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (stderr only, so stdout stays a clean list of URLs)
// 2. Parse command-line flags using clap
// 3. Refuse to run without piped input
// 4. Crawl each seed URL from stdin, one after another, printing results
//
// Exit codes: 0 = done, 1 = no input on stdin, 2 = unexpected error
// =============================================================================

mod cli;

use std::io::{self, BufWriter, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{normalize_args, Cli};
use link_harvester::{crawl, CrawlReport};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    if io::stdin().is_terminal() {
        eprintln!("No urls detected. Hint: cat urls.txt | link-harvester");
        return Ok(1);
    }

    let mut out = BufWriter::new(io::stdout());
    crawl_seeds(&cli, BufReader::new(tokio::io::stdin()), &mut out).await?;

    Ok(0)
}

// Crawls every seed line from `input`, strictly one at a time.
// Lines that are not valid UTF-8 are decoded lossily rather than ending the run.
async fn crawl_seeds<R, W>(cli: &Cli, mut input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .await
            .context("failed to read stdin")?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let seed = line.trim();
        if seed.is_empty() {
            continue;
        }

        let results = crawl(&cli.request_for(seed)).await;

        if cli.json {
            let report = CrawlReport {
                seed: seed.to_string(),
                results,
            };
            serde_json::to_writer(&mut *out, &report)?;
            writeln!(out)?;
        } else {
            print_results(out, &results)?;
        }

        out.flush().context("failed to write results")?;
    }

    Ok(())
}

fn print_results(out: &mut impl Write, results: &[String]) -> io::Result<()> {
    for url in results {
        writeln!(out, "{}", url)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(normalize_args(args.iter().map(std::ffi::OsString::from))).unwrap()
    }

    fn serve_seed_page(server: &Server) {
        server.expect(
            Expectation::matching(request::method_path("GET", "/"))
                .times(1)
                .respond_with(
                    status_code(200)
                        .insert_header("Content-Type", "text/html")
                        .body(r#"<a href="/a">a</a>"#),
                ),
        );
    }

    #[tokio::test]
    async fn test_bad_utf8_line_does_not_stop_later_seeds() {
        let server = Server::run();
        serve_seed_page(&server);

        let mut input = b"caf\xe9.invalid\n\n".to_vec();
        input.extend_from_slice(server.addr().to_string().as_bytes());
        input.push(b'\n');

        let mut out = Vec::new();
        crawl_seeds(&cli(&["link-harvester", "-d", "0"]), &input[..], &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}\n", server.url_str("/a"))
        );
    }

    #[tokio::test]
    async fn test_last_line_without_newline_and_json_output() {
        let server = Server::run();
        serve_seed_page(&server);

        let seed = server.url_str("/");
        let mut out = Vec::new();
        crawl_seeds(&cli(&["link-harvester", "-d", "0", "-json"]), seed.as_bytes(), &mut out)
            .await
            .unwrap();

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["seed"], seed);
        assert_eq!(report["results"][0], server.url_str("/a"));
    }

    #[test]
    fn test_print_results_one_per_line() {
        let mut buf = Vec::new();
        let results = vec![
            "http://example.com/a".to_string(),
            "http://example.com/b".to_string(),
        ];
        print_results(&mut buf, &results).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "http://example.com/a\nhttp://example.com/b\n"
        );
    }
}
