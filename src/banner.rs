//! Banner grabbing for open TCP ports.
//!
//! Sends a bare line break and reads whatever the service answers with in
//! a single read. No protocol awareness: the bytes are decoded lossily and
//! handed back as-is.

use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::trace;

/// Maximum bytes kept from a banner read.
pub const MAX_BANNER_SIZE: usize = 100;

/// Probe written to coax a response out of line-oriented services.
pub const BANNER_PROBE: &[u8] = b"\r\n";

/// Placeholder used when nothing readable came back.
pub const NO_BANNER: &str = "(no banner found)";

/// Grab a banner from a connected stream.
///
/// Both the write and the read are bounded by `deadline`. Any failure,
/// timeout, or empty read yields [`NO_BANNER`].
pub async fn grab_banner<S>(stream: &mut S, deadline: Duration) -> String
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    match timeout(deadline, stream.write_all(BANNER_PROBE)).await {
        Ok(Ok(())) => {}
        _ => return NO_BANNER.to_string(),
    }

    let mut buffer = [0u8; MAX_BANNER_SIZE];
    match timeout(deadline, stream.read(&mut buffer)).await {
        Ok(Ok(n)) if n > 0 => {
            trace!(bytes = n, raw = ?&buffer[..n], "banner bytes received");
            decode_banner(&buffer[..n])
        }
        _ => NO_BANNER.to_string(),
    }
}

/// Decode raw banner bytes, replacing invalid UTF-8 instead of failing.
///
/// Only trailing line endings are stripped so the banner fits on one
/// output line. Bytes that arrived are never replaced by [`NO_BANNER`].
pub fn decode_banner(data: &[u8]) -> String {
    String::from_utf8_lossy(data)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    #[test]
    fn test_decode_plain_banner() {
        assert_eq!(decode_banner(b"SSH-2.0-OpenSSH_9.6\r\n"), "SSH-2.0-OpenSSH_9.6");
    }

    #[test]
    fn test_decode_replaces_invalid_utf8() {
        assert_eq!(decode_banner(b"220 \xff ready"), "220 \u{FFFD} ready");
    }

    #[test]
    fn test_decode_keeps_received_whitespace() {
        assert_eq!(decode_banner(b"\r\n"), "");
        assert_eq!(decode_banner(b"  ready \r\n"), "  ready ");
        assert_ne!(decode_banner(b" \r\n"), NO_BANNER);
    }

    #[tokio::test]
    async fn test_grab_line_break_reply_is_not_no_banner() {
        let (mut client, mut server) = duplex(256);

        tokio::spawn(async move {
            let mut probe = [0u8; 2];
            server.read_exact(&mut probe).await.unwrap();
            server.write_all(b"\r\n").await.unwrap();
            server
        });

        let banner = grab_banner(&mut client, Duration::from_secs(1)).await;
        assert_eq!(banner, "");
    }

    #[tokio::test]
    async fn test_grab_sends_probe_and_reads_reply() {
        let (mut client, mut server) = duplex(256);

        let server_task = tokio::spawn(async move {
            let mut probe = [0u8; 2];
            server.read_exact(&mut probe).await.unwrap();
            server.write_all(b"220 mail ready\r\n").await.unwrap();
            probe
        });

        let banner = grab_banner(&mut client, Duration::from_secs(1)).await;
        assert_eq!(banner, "220 mail ready");
        assert_eq!(&server_task.await.unwrap(), BANNER_PROBE);
    }

    #[tokio::test]
    async fn test_grab_silent_peer_times_out() {
        let (mut client, _server) = duplex(256);
        let banner = grab_banner(&mut client, Duration::from_millis(50)).await;
        assert_eq!(banner, NO_BANNER);
    }

    #[tokio::test]
    async fn test_grab_closed_peer_is_no_banner() {
        let (mut client, server) = duplex(256);
        drop(server);
        let banner = grab_banner(&mut client, Duration::from_millis(50)).await;
        assert_eq!(banner, NO_BANNER);
    }
}
