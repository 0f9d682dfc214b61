use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

/// Fixed preamble sent ahead of every served page.
pub const OK_PREAMBLE: &[u8] = b"HTTP/1.1 200 OK\nContent-type: text/html\n\n";

/// Complete response for paths that resolve to no handler.
pub const NOT_FOUND_PAGE: &[u8] =
    b"HTTP/1.1 404 Not Found\nContent-type: text/html\n\n<h1>404 Not Found</h1>\n";

const CHUNK_SIZE: usize = 8192;

/// Streams the page at `name` to the client behind [`OK_PREAMBLE`].
///
/// The preamble goes out before the file is opened, so a page that cannot be
/// opened yields a 200 status with an empty body.
pub async fn send_page<W>(stream: &mut W, name: &Path) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    stream.write_all(OK_PREAMBLE).await?;

    let mut file = match File::open(name).await {
        Ok(file) => file,
        Err(e) => {
            warn!("Page {} not readable: {}", name.display(), e);
            return Ok(());
        }
    };

    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        stream.write_all(&buf[..n]).await?;
    }

    Ok(())
}

/// Sends the fixed not-found page.
pub async fn send_not_found<W>(stream: &mut W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    stream.write_all(NOT_FOUND_PAGE).await?;
    Ok(())
}
