// src/ingest/interactive.rs
use std::io::{BufRead, Write};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::ingest::{push_built, RawRecord, RecordSource, SourceBatch};

/// One-shot interactive source: prompts for a variant selection and its
/// fields, yielding exactly one record or none.
///
/// Generic over the prompt handles so tests can script it without a TTY;
/// the binary wires it to stdin/stdout.
pub struct InteractiveSource<R, W> {
    io: Mutex<PromptIo<R, W>>,
}

struct PromptIo<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead + Send, W: Write + Send> InteractiveSource<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new(PromptIo { reader, writer }),
        }
    }
}

fn prompt<R: BufRead, W: Write>(io: &mut PromptIo<R, W>, msg: &str) -> std::io::Result<String> {
    write!(io.writer, "{msg}")?;
    io.writer.flush()?;
    let mut line = String::new();
    io.reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn ask<R: BufRead, W: Write>(io: &mut PromptIo<R, W>) -> std::io::Result<Option<RawRecord>> {
    let choice = prompt(
        io,
        "Select record type:\n1. News\n2. Private Ad\n3. Event\nEnter choice (1/2/3): ",
    )?;

    let raw = match choice.as_str() {
        "1" => RawRecord::News {
            text: prompt(io, "Enter news text: ")?,
            city: prompt(io, "Enter city: ")?,
        },
        "2" => RawRecord::PrivateAd {
            text: prompt(io, "Enter ad text: ")?,
            expiration_date: prompt(io, "Enter expiration date (YYYY-MM-DD): ")?,
        },
        "3" => RawRecord::Event {
            text: prompt(io, "Enter event text: ")?,
            location: prompt(io, "Enter event location: ")?,
            event_date: prompt(io, "Enter event date (YYYY-MM-DD): ")?,
        },
        _ => {
            writeln!(io.writer, "Invalid choice!")?;
            return Ok(None);
        }
    };
    Ok(Some(raw))
}

#[async_trait]
impl<R: BufRead + Send, W: Write + Send> RecordSource for InteractiveSource<R, W> {
    async fn fetch(&self) -> Result<SourceBatch> {
        let mut io = self.io.lock().expect("interactive io mutex poisoned");

        let mut batch = SourceBatch::default();
        match ask(&mut io) {
            Ok(Some(raw)) => push_built(&mut batch, "interactive", raw),
            Ok(None) => batch.skipped += 1,
            Err(e) => {
                tracing::warn!(target: "ingest", source = "interactive", error = %e, "prompt aborted");
                batch.skipped += 1;
            }
        }
        Ok(batch)
    }

    fn name(&self) -> &'static str {
        "interactive"
    }
}
