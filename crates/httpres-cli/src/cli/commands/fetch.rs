//! `httpres fetch <ref>...` – resolve references into resources.

use anyhow::{Context, Result};
use httpres_core::config::HttpresConfig;
use httpres_core::{CurlTransport, FetchOptions, HttpAdapter, Resource};
use std::io::Write;
use std::sync::Arc;

use super::reference_arg::{load_reference, save_reference};
use crate::cli::FetchArgs;

/// Splits a `Name: value` header argument.
fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .with_context(|| format!("header must look like \"Name: value\": {:?}", raw))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("header name is empty: {:?}", raw);
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn fetch_options(args: &FetchArgs) -> Result<FetchOptions> {
    let mut opts = FetchOptions::new();
    if let Some(method) = &args.method {
        opts = opts.method(method.to_ascii_uppercase());
    }
    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        opts = opts.header(name, value);
    }
    if let Some(data) = &args.data {
        opts = opts.body(data.as_bytes().to_vec());
    }
    if args.follow {
        opts = opts.option("follow_location", true);
    }
    if let Some(secs) = args.timeout {
        opts = opts.option("timeout", secs);
    }
    if let Some(mode) = args.timestamp {
        opts = opts.timestamp(mode);
    }
    Ok(opts)
}

fn print_summary(resource: &Resource) {
    eprintln!(
        "{}  {}  {} bytes  {}",
        resource.reference.uri(),
        resource.content.media_type,
        resource.content.data.len(),
        resource.integrity.timestamp.to_rfc3339()
    );
}

pub async fn run_fetch(cfg: &HttpresConfig, args: FetchArgs) -> Result<()> {
    if args.refs.len() > 1 && (args.output.is_some() || args.save_ref.is_some()) {
        anyhow::bail!("--output and --save-ref need exactly one reference");
    }

    let opts = fetch_options(&args)?;
    let references = args
        .refs
        .iter()
        .map(|r| load_reference(r))
        .collect::<Result<Vec<_>>>()?;

    let adapter = Arc::new(HttpAdapter::new(
        CurlTransport::new(cfg.curl_settings()),
        cfg.adapter_config(),
    ));

    // One blocking task per reference; the adapter is shared.
    let handles: Vec<_> = references
        .into_iter()
        .map(|reference| {
            let adapter = Arc::clone(&adapter);
            let opts = opts.clone();
            tokio::task::spawn_blocking(move || adapter.open(&reference, &opts))
        })
        .collect();

    let single = handles.len() == 1;
    let total = handles.len();
    let mut failed = 0usize;
    for (arg, handle) in args.refs.iter().zip(handles) {
        let resource = match handle.await.context("fetch task join")? {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("fetch {} failed: {}", arg, e);
                eprintln!("{}: {}", arg, e);
                failed += 1;
                continue;
            }
        };
        print_summary(&resource);

        if let Some(path) = &args.save_ref {
            save_reference(&resource.reference, path)?;
        }
        if let Some(path) = &args.output {
            std::fs::write(path, &resource.content.data)
                .with_context(|| format!("write {}", path.display()))?;
        } else if single {
            std::io::stdout()
                .write_all(&resource.content.data)
                .context("write body to stdout")?;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} fetches failed", failed, total);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpres_core::{Override, TimestampMode};

    fn args(refs: &[&str]) -> FetchArgs {
        FetchArgs {
            refs: refs.iter().map(|s| s.to_string()).collect(),
            method: None,
            headers: Vec::new(),
            data: None,
            follow: false,
            timeout: None,
            timestamp: None,
            output: None,
            save_ref: None,
        }
    }

    #[test]
    fn parse_header_splits_on_first_colon() {
        assert_eq!(
            parse_header("Authorization: Bearer a:b").unwrap(),
            ("Authorization".to_string(), "Bearer a:b".to_string())
        );
        assert!(parse_header("no colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn no_flags_means_no_overrides() {
        let opts = fetch_options(&args(&["http://a"])).unwrap();
        assert!(opts.overrides().is_empty());
    }

    #[test]
    fn flags_become_ordered_overrides() {
        let mut a = args(&["http://a"]);
        a.method = Some("post".to_string());
        a.headers = vec!["Accept: text/csv".to_string()];
        a.data = Some("q=1".to_string());
        a.follow = true;
        a.timeout = Some(10);
        a.timestamp = Some(TimestampMode::Client);
        let opts = fetch_options(&a).unwrap();
        let o = opts.overrides();
        assert_eq!(o[0], Override::Method("POST".to_string()));
        assert!(matches!(o[1], Override::Headers(Some(_))));
        assert_eq!(o[2], Override::Body(b"q=1".to_vec()));
        assert_eq!(opts.timestamp_mode(), Some(TimestampMode::Client));
        assert_eq!(o.len(), 6);
    }

    #[tokio::test]
    async fn output_requires_single_reference() {
        let mut a = args(&["http://a", "http://b"]);
        a.output = Some("out.bin".into());
        let err = run_fetch(&HttpresConfig::default(), a).await.unwrap_err();
        assert!(err.to_string().contains("exactly one reference"));
    }
}
