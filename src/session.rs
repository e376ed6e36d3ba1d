//! Interactive prompt loop
//!
//! Reads one line at a time, optionally discovers the caller's own address,
//! validates it and prints a geolocation report. Every interaction finishes
//! before the next line is read.

use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::error::GeoError;
use crate::model::{classify, SessionMetrics};
use crate::service::{ExternalIpResolver, GeoService, Throttle};

const BANNER: &str = "IP address geolocation (type 'exit' to quit)";
const PROMPT: &str = "Enter an IP address (leave empty to use your own): ";

/// What a single line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    OwnAddress,
    Address(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") {
            Command::Exit
        } else if input.is_empty() {
            Command::OwnAddress
        } else {
            Command::Address(input.to_string())
        }
    }
}

pub struct Session {
    resolver: ExternalIpResolver,
    geo: GeoService,
    throttle: Throttle,
    metrics: SessionMetrics,
}

impl Session {
    pub fn new(resolver: ExternalIpResolver, geo: GeoService, throttle: Throttle) -> Self {
        Self {
            resolver,
            geo,
            throttle,
            metrics: SessionMetrics::new(),
        }
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    /// Run until `exit` or end of input.
    pub async fn run<R, W>(&mut self, mut input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut buf = Vec::new();
        writeln!(out, "{}\n", BANNER)?;

        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            buf.clear();
            // Raw bytes: a line that is not UTF-8 is just an invalid address
            let command = if input.read_until(b'\n', &mut buf).await? == 0 {
                debug!("Input closed");
                Command::Exit
            } else {
                Command::parse(&String::from_utf8_lossy(&buf))
            };

            match command {
                Command::Exit => {
                    writeln!(out, "Exiting.")?;
                    return Ok(());
                }
                Command::OwnAddress => {
                    writeln!(out, "\nDetecting your external IP...")?;
                    match self.resolver.resolve_external_ip().await {
                        Some(ip) => {
                            writeln!(out, "Your external IP: {}", ip)?;
                            self.check(&ip, out).await?;
                        }
                        None => self.reject(GeoError::ExternalIpUnavailable, out)?,
                    }
                }
                Command::Address(ip) => self.check(&ip, out).await?,
            }
        }
    }

    async fn check<W: Write>(&mut self, ip: &str, out: &mut W) -> io::Result<()> {
        let kind = classify(ip);
        if !kind.is_valid() {
            return self.reject(GeoError::InvalidAddress, out);
        }

        writeln!(out, "\nChecking {} address: {}...", kind, ip)?;
        self.throttle.wait().await;

        self.metrics.record_lookup();
        match self.geo.lookup(ip).await {
            Ok(record) => {
                self.metrics.record_success();
                writeln!(out, "\n{}\n", record)
            }
            Err(e) => {
                self.metrics.record_failure(&e);
                report_error(&e, out)
            }
        }
    }

    /// Input that never reached a lookup.
    fn reject<W: Write>(&mut self, err: GeoError, out: &mut W) -> io::Result<()> {
        self.metrics.record_rejected(&err);
        report_error(&err, out)
    }
}

fn report_error<W: Write>(err: &GeoError, out: &mut W) -> io::Result<()> {
    debug!("Reporting {:?} ({:?})", err, err.category());
    writeln!(out, "\nError: {}\n", err)
}
