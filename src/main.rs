use std::path::PathBuf;
use std::sync::Arc;

use proda::config::Config;
use proda::http::content;
use proda::http::request::Request;
use proda::router::{Handler, HandlerFuture, ResponseStream, Router};
use proda::server;

/// Serves the landing page.
///
/// Requests that only fall back here (any unregistered single-segment path)
/// get the not-found page instead.
struct IndexPage {
    file: PathBuf,
}

impl Handler for IndexPage {
    fn handle<'a>(
        &'a self,
        stream: &'a mut ResponseStream,
        request: &'a Request,
    ) -> HandlerFuture<'a> {
        Box::pin(async move {
            if request.path != "/" {
                return content::send_not_found(stream).await;
            }
            content::send_page(stream, &self.file).await
        })
    }
}

/// Serves a single fixed page.
struct StaticPage {
    file: PathBuf,
}

impl Handler for StaticPage {
    fn handle<'a>(
        &'a self,
        stream: &'a mut ResponseStream,
        _request: &'a Request,
    ) -> HandlerFuture<'a> {
        Box::pin(async move { content::send_page(stream, &self.file).await })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(cfg.log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO))
        .init();

    let mut router = Router::new()?;
    router.register(
        "/",
        Arc::new(IndexPage {
            file: cfg.pages_dir.join("index.html"),
        }),
    )?;
    router.register(
        "/scream",
        Arc::new(StaticPage {
            file: cfg.pages_dir.join("scream.html"),
        }),
    )?;

    tokio::select! {
        res = server::listener::run(&cfg, &router) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
