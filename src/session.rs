//! The interactive command loop.
//!
//! A [`Session`] holds the shared [`Services`] and the single piece of
//! mutable state, the current encyclopedia term. Commands are executed one
//! at a time; each awaits its fetch before the next line is read.

use std::future::Future;
use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use upb_services::{Reply, Services};

use crate::command::{Command, USAGE};
use crate::error::Result;

pub const PROMPT: &str = "uPB> ";
const FAREWELL: &str = "Bye!";

/// Whether the loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Print the startup banner and command list.
pub fn write_banner<W: Write>(out: &mut W) -> Result<()> {
    writeln!(
        out,
        "=== uPB v{} (JSON Browser) ===",
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(
        out,
        "Commands: search <term>, ddg <query>, xkcd [num], hn, quote, joke, \
         weather <place>, define <word>, price <symbols>, stock <symbols>, \
         time [zone], ip, cat, advice, reload, quit\n"
    )?;
    Ok(())
}

fn write_reply<W: Write>(out: &mut W, reply: &Reply) -> Result<()> {
    write!(out, "\n=== {} ===\n{}\n\n", reply.title, reply.body)?;
    Ok(())
}

pub struct Session {
    services: Services,
    current_term: String,
}

impl Session {
    pub fn new(services: Services, initial_term: impl Into<String>) -> Self {
        Self {
            services,
            current_term: initial_term.into(),
        }
    }

    /// The term `reload` fetches.
    pub fn current_term(&self) -> &str {
        &self.current_term
    }

    /// Execute one parsed command, writing all output to `out`.
    ///
    /// Fetch failures are part of the output, never an `Err`; only writes
    /// to `out` can fail.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        tracing::debug!(?command, "executing");

        let reply = match command {
            Command::Blank => return Ok(Flow::Continue),
            Command::Quit => {
                writeln!(out, "{FAREWELL}")?;
                return Ok(Flow::Quit);
            }
            Command::Unknown(_) => {
                writeln!(out, "{USAGE}")?;
                return Ok(Flow::Continue);
            }
            Command::Search(term) => {
                self.current_term = term;
                return self.show_current_term(out).await;
            }
            Command::Reload => return self.show_current_term(out).await,
            Command::Ddg(query) => {
                writeln!(out, "Searching DuckDuckGo: {query}")?;
                out.flush()?;
                let reply = self.services.duckduckgo(&query).await;
                self.current_term = query;
                reply
            }
            Command::Xkcd(number) => self.services.xkcd(number).await,
            Command::Hn => self.services.hacker_news().await,
            Command::Quote => self.services.quote().await,
            Command::Joke => self.services.joke().await,
            Command::Cat => self.services.cat_fact().await,
            Command::Advice => self.services.advice().await,
            Command::Ip => self.services.ip().await,
            Command::Weather(place) => self.services.weather(&place).await,
            Command::Define(word) => self.services.define(&word).await,
            Command::Price(symbols) => self.services.price(&symbols).await,
            Command::Stock(symbols) => self.services.stock(&symbols).await,
            Command::Time(zone) => self.services.world_time(zone.as_deref()).await,
        };

        write_reply(out, &reply)?;
        Ok(Flow::Continue)
    }

    async fn show_current_term<W: Write>(&mut self, out: &mut W) -> Result<Flow> {
        writeln!(out, "Fetching: {}", self.current_term)?;
        out.flush()?;
        let reply = self.services.wikipedia(&self.current_term).await;
        write_reply(out, &reply)?;
        Ok(Flow::Continue)
    }

    /// Prompt, read, and execute lines until `quit`, end of input, or Ctrl+C.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        self.run_until(input, out, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "cannot listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Like [`run`](Self::run), but stops when `interrupt` resolves.
    ///
    /// The interrupt is watched while waiting for input and while a command
    /// runs; a fetch in flight is abandoned.
    pub async fn run_until<R, W, F>(&mut self, mut input: R, out: &mut W, interrupt: F) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        F: Future<Output = ()>,
    {
        let mut interrupt = std::pin::pin!(interrupt);
        let mut buf = Vec::new();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            buf.clear();
            let read = tokio::select! {
                read = input.read_until(b'\n', &mut buf) => read?,
                () = &mut interrupt => {
                    tracing::debug!("interrupted");
                    return farewell(out);
                }
            };
            if read == 0 {
                return farewell(out);
            }

            // Undecodable bytes become U+FFFD and fall through to usage.
            let line = String::from_utf8_lossy(&buf);
            let command = Command::parse(&line);

            let flow = tokio::select! {
                flow = self.execute(command, out) => flow?,
                () = &mut interrupt => {
                    tracing::debug!("interrupted");
                    return farewell(out);
                }
            };
            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }
}

/// Goodbye on its own line, after a pending prompt or partial output.
fn farewell<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "\n{FAREWELL}")?;
    Ok(())
}
