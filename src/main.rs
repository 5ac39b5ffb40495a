// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use bytes::Bytes;
use clap::Parser;
use hyper::Request;
use tracing::{error, info, warn};

use watch_http::{client::ObservedClient, config::Config};

#[derive(Parser, Debug)]
#[command(name = "watch-http")]
struct Args {
    /// URLs to fetch through the observed client
    #[arg(required = true)]
    urls: Vec<String>,

    /// HTTP method applied to every URL
    #[arg(long, default_value = "GET")]
    method: String,

    /// Request body sent with every request
    #[arg(long)]
    body: Option<String>,

    /// Optional config TOML path (capture limits, history bound)
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let cfg = if let Some(ref p) = args.config {
        Config::load_from_path(p).await.unwrap_or_else(|e| {
            warn!(%p, %e, "failed to load config, using defaults");
            Config::default()
        })
    } else {
        Config::default()
    };

    let method: hyper::Method = args.method.parse()?;
    let body = Bytes::from(args.body.clone().unwrap_or_default());

    let repository = cfg.repository();
    let client = ObservedClient::new(&cfg, repository.clone())?;

    for url in &args.urls {
        let req = match Request::builder()
            .method(method.clone())
            .uri(url.as_str())
            .body(body.clone())
        {
            Ok(r) => r,
            Err(e) => {
                error!(%url, %e, "skipping invalid request");
                continue;
            }
        };
        // Failures are data here: they end up in the history dump below.
        match client.request(req).await {
            Ok(resp) => info!(%url, status = resp.status().as_u16(), "fetched"),
            Err(e) => error!(%url, %e, "request failed"),
        }
    }

    println!("{}", serde_json::to_string_pretty(&repository.all())?);
    Ok(())
}
