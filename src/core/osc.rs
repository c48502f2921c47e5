//! OSC signal sink
//!
//! Publishes the prediction as a boolean avatar parameter. An OSC 1.0
//! boolean message is the address pattern, the type tag string `,T` or
//! `,F`, and no argument payload; strings are NUL-terminated and padded
//! to a multiple of 4 bytes.

use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::debug;

use crate::types::SinkError;

/// Encode an OSC message carrying a single boolean
pub fn encode_bool_message(address: &str, value: bool) -> Vec<u8> {
    let mut buf = Vec::with_capacity(address.len() + 8);
    push_padded_str(&mut buf, address);
    push_padded_str(&mut buf, if value { ",T" } else { ",F" });
    buf
}

fn push_padded_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(s.as_bytes());
    buf.push(0);
    while buf.len() % 4 != 0 {
        buf.push(0);
    }
}

/// UDP sender for one OSC address
#[derive(Debug)]
pub struct OscSink {
    socket: UdpSocket,
    target: SocketAddr,
    address: String,
}

impl OscSink {
    /// Bind a local socket for sending to `target`
    pub async fn connect(target: &str, address: impl Into<String>) -> Result<Self, SinkError> {
        let target: SocketAddr = target
            .parse()
            .map_err(|_| SinkError::Target(target.to_string()))?;
        let bind = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(bind).await?;
        Ok(Self {
            socket,
            target,
            address: address.into(),
        })
    }

    /// Send the boolean parameter
    pub async fn send(&self, value: bool) -> Result<(), SinkError> {
        let packet = encode_bool_message(&self.address, value);
        self.socket.send_to(&packet, self.target).await?;
        debug!(address = %self.address, value, "OSC sent");
        Ok(())
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OSC_PARAMETER_PATH;

    #[test]
    fn test_encode_true() {
        let packet = encode_bool_message("/a", true);
        assert_eq!(packet, vec![b'/', b'a', 0, 0, b',', b'T', 0, 0]);
    }

    #[test]
    fn test_encode_pads_exact_multiple() {
        // "/abc" is 4 bytes, so it needs a full 4-byte NUL pad
        let packet = encode_bool_message("/abc", false);
        assert_eq!(packet, vec![b'/', b'a', b'b', b'c', 0, 0, 0, 0, b',', b'F', 0, 0]);
    }

    #[test]
    fn test_encode_parameter_path() {
        let packet = encode_bool_message(OSC_PARAMETER_PATH, true);
        assert_eq!(packet.len() % 4, 0);
        assert!(packet.starts_with(OSC_PARAMETER_PATH.as_bytes()));
        assert_eq!(&packet[packet.len() - 4..], &[b',', b'T', 0, 0]);
    }

    #[test]
    fn test_invalid_target() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let err = rt.block_on(OscSink::connect("not an address", "/x")).unwrap_err();
        assert!(matches!(err, SinkError::Target(_)));
    }

    #[tokio::test]
    async fn test_send_reaches_receiver() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target = receiver.local_addr().unwrap().to_string();

        let sink = OscSink::connect(&target, "/avatar/parameters/Test").await.unwrap();
        sink.send(true).await.unwrap();

        let mut buf = [0u8; 64];
        let (n, _) = receiver.recv_from(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], encode_bool_message("/avatar/parameters/Test", true).as_slice());
    }
}
