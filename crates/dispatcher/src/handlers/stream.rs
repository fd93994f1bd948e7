//! StreamHandler - writes one line per message to any writer

use contracts::{ContractError, Message, MessageHandler};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Stderr, Stdout, Write};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Configuration for a file-backed StreamHandler
#[derive(Debug, Clone)]
pub struct StreamHandlerConfig {
    /// Output file path
    pub path: PathBuf,
    /// Append to an existing file instead of truncating it
    pub append: bool,
}

impl StreamHandlerConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, String> {
        let path = params
            .get("path")
            .map(PathBuf::from)
            .ok_or_else(|| "missing 'path' parameter".to_string())?;

        let append = match params.get("append").map(String::as_str) {
            Some("true") | None => true,
            Some("false") => false,
            Some(other) => return Err(format!("invalid 'append' value '{}'", other)),
        };

        Ok(Self { path, append })
    }
}

/// Handler that writes `message + "\n"` and flushes on every emit
pub struct StreamHandler<W: Write + Send> {
    name: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> StreamHandler<W> {
    /// Wrap an arbitrary writer
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Recover the wrapped writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_line(&self, message: &Message) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(message.as_str().as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

impl StreamHandler<Stdout> {
    /// Handler writing to standard output
    pub fn stdout(name: impl Into<String>) -> Self {
        Self::new(name, io::stdout())
    }
}

impl StreamHandler<Stderr> {
    /// Handler writing to standard error
    pub fn stderr(name: impl Into<String>) -> Self {
        Self::new(name, io::stderr())
    }
}

impl StreamHandler<File> {
    /// Open (or create) a file, creating parent directories as needed
    #[instrument(
        name = "stream_handler_open",
        skip(name, config),
        fields(path = %config.path.display())
    )]
    pub fn open(name: impl Into<String>, config: &StreamHandlerConfig) -> io::Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(config.append)
            .truncate(!config.append)
            .open(&config.path)?;

        let name = name.into();
        debug!(handler = %name, append = config.append, "File handler opened");
        Ok(Self::new(name, file))
    }

    /// Create from params (for registry)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let config = StreamHandlerConfig::from_params(params)
            .map_err(|e| ContractError::config_validation(&name, e))?;

        Self::open(name.clone(), &config)
            .map_err(|e| ContractError::handler_connection(name, e.to_string()))
    }
}

impl<W: Write + Send> MessageHandler for StreamHandler<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, message: &Message) -> Result<(), ContractError> {
        self.write_line(message)
            .map_err(|e| ContractError::handler_emit(&self.name, e.to_string()))
    }

    fn flush(&self) -> Result<(), ContractError> {
        self.writer
            .lock()
            .flush()
            .map_err(|e| ContractError::handler_emit(&self.name, e.to_string()))
    }
}
