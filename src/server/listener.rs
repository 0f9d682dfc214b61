use bytes::BytesMut;
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::http::content;
use crate::http::parser::RequestParser;
use crate::router::Router;

const READ_BUF_SIZE: usize = 4096;

/// Binds the configured address and serves connections one at a time.
///
/// Each connection is accepted, read, routed, answered, and closed before
/// the next accept. A failed accept or a failed connection is logged and
/// skipped; neither stops the loop.
pub async fn run(cfg: &Config, router: &Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", cfg.listen_addr);

    loop {
        let (mut stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Accept failed: {}", e);
                continue;
            }
        };

        if let Err(e) = serve(&mut stream, router).await {
            error!("Connection error from {}: {}", peer, e);
        }
    }
}

/// Reads one request line and answers it.
///
/// Bytes are fed to the parser chunk by chunk until the request line is
/// complete or the peer closes; whatever parsed by then is dispatched, with
/// unresolvable paths answered by the not-found page.
async fn serve(stream: &mut TcpStream, router: &Router) -> anyhow::Result<()> {
    let mut parser = RequestParser::new();
    let mut buf = BytesMut::with_capacity(READ_BUF_SIZE);

    while !parser.is_done() {
        buf.clear();
        let n = stream.read_buf(&mut buf).await?;
        if n == 0 {
            break;
        }
        parser.feed(&buf);
    }

    let request = parser.finish();
    match router.resolve(&request.path) {
        Some(slot) => {
            info!("{} {} -> slot {}", request.method, request.path, slot);
            router.dispatch(slot, stream, &request).await
        }
        None => {
            info!("{} {} -> 404", request.method, request.path);
            content::send_not_found(stream).await
        }
    }
}
