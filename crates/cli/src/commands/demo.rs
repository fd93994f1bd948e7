//! `demo` command implementation.
//!
//! Routes two fixed messages through a text filter to stdout, and
//! optionally to a loopback socket.

use std::io::{BufRead, BufReader};
use std::net::{Ipv4Addr, TcpListener};
use std::thread;

use anyhow::{Context, Result};
use contracts::Message;
use dispatcher::{Dispatcher, SocketHandler, SocketHandlerConfig, StreamHandler, TextFilter};
use tracing::info;

use crate::cli::DemoArgs;

const DEMO_MESSAGES: [&str; 2] = ["Ignored: this will not be logged", "Error: this is important"];

/// Execute the `demo` command
pub fn run_demo(args: &DemoArgs) -> Result<()> {
    let mut builder = Dispatcher::builder()
        .filter(TextFilter::new(args.pattern.as_str()))
        .handler(StreamHandler::stdout("console"));

    let mut receiver = None;
    if args.socket {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .context("Failed to bind loopback listener")?;
        let addr = listener.local_addr()?;
        let config = SocketHandlerConfig {
            addr: addr.to_string(),
            connect_timeout: None,
        };
        builder = builder.handler(
            SocketHandler::connect("socket", &config)
                .with_context(|| format!("Failed to connect to {}", addr))?,
        );
        let (peer, _) = listener.accept().context("Failed to accept demo connection")?;
        receiver = Some(thread::spawn(move || {
            BufReader::new(peer)
                .lines()
                .map_while(|line| line.ok())
                .collect::<Vec<_>>()
        }));
    }

    let dispatcher = builder.build();
    info!(pattern = %args.pattern, handlers = ?dispatcher.handler_names(), "Running demo");

    for text in DEMO_MESSAGES {
        dispatcher.dispatch(&Message::from(text))?;
    }

    // Dropping the dispatcher closes the socket so the reader sees EOF
    drop(dispatcher);

    if let Some(receiver) = receiver {
        let lines = receiver
            .join()
            .map_err(|_| anyhow::anyhow!("Socket reader thread panicked"))?;
        for line in lines {
            println!("The socket received: {}", line);
        }
    }

    Ok(())
}
