//! SocketHandler - newline-delimited ASCII over TCP

use contracts::{ContractError, Message, MessageHandler};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::{self, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Configuration for SocketHandler
#[derive(Debug, Clone)]
pub struct SocketHandlerConfig {
    /// Target address (`host:port`)
    pub addr: String,
    /// Connect timeout (None = OS default)
    pub connect_timeout: Option<Duration>,
}

impl SocketHandlerConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, String> {
        let addr = params
            .get("addr")
            .ok_or_else(|| "missing 'addr' parameter".to_string())?
            .clone();

        let connect_timeout = params
            .get("timeout_ms")
            .map(|s| {
                s.parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| format!("invalid timeout_ms '{}': {}", s, e))
            })
            .transpose()?;

        Ok(Self {
            addr,
            connect_timeout,
        })
    }
}

/// Handler that sends each message over a connected TCP stream
///
/// Payloads are `message + "\n"` and must be pure ASCII; anything else is
/// rejected before a single byte is written.
pub struct SocketHandler {
    name: String,
    peer: SocketAddr,
    stream: Mutex<TcpStream>,
}

impl SocketHandler {
    /// Connect to the configured address
    #[instrument(
        name = "socket_handler_connect",
        skip(name, config),
        fields(addr = %config.addr)
    )]
    pub fn connect(name: impl Into<String>, config: &SocketHandlerConfig) -> io::Result<Self> {
        let name = name.into();
        let mut last_err = None;

        for addr in config.addr.to_socket_addrs()? {
            let attempt = match config.connect_timeout {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => {
                    debug!(handler = %name, peer = %addr, "SocketHandler connected");
                    return Self::from_stream(name, stream);
                }
                Err(e) => {
                    warn!(handler = %name, peer = %addr, error = %e, "Connect attempt failed");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("'{}' resolved to no addresses", config.addr),
            )
        }))
    }

    /// Wrap an already connected stream
    pub fn from_stream(name: impl Into<String>, stream: TcpStream) -> io::Result<Self> {
        let peer = stream.peer_addr()?;
        Ok(Self {
            name: name.into(),
            peer,
            stream: Mutex::new(stream),
        })
    }

    /// Create from params (for registry)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let config = SocketHandlerConfig::from_params(params)
            .map_err(|e| ContractError::config_validation(&name, e))?;

        Self::connect(name.clone(), &config)
            .map_err(|e| ContractError::handler_connection(name, e.to_string()))
    }

    /// Remote address
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    fn encode(&self, message: &Message) -> Result<Vec<u8>, ContractError> {
        if !message.as_str().is_ascii() {
            return Err(ContractError::handler_emit(&self.name, "message is not ASCII"));
        }
        let mut payload = Vec::with_capacity(message.len() + 1);
        payload.extend_from_slice(message.as_str().as_bytes());
        payload.push(b'\n');
        Ok(payload)
    }
}

impl MessageHandler for SocketHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, message: &Message) -> Result<(), ContractError> {
        let payload = self.encode(message)?;
        self.stream
            .lock()
            .write_all(&payload)
            .map_err(|e| ContractError::handler_emit(&self.name, e.to_string()))
    }

    fn flush(&self) -> Result<(), ContractError> {
        self.stream
            .lock()
            .flush()
            .map_err(|e| ContractError::handler_emit(&self.name, e.to_string()))
    }
}
