//! Terminal front end: one `select!` loop over user input, settlements of
//! in-flight analysis requests, and state updates from the controller.
//!
//! Every submitted request runs on its own task until it settles; none is
//! ever cancelled, and each outcome is applied as it arrives.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::analysis::AnalysisService;
use crate::controller::SubmissionController;
use crate::errors::AnalysisError;
use crate::models::{AnalysisResult, SubmissionState};
use crate::picker;
use crate::view::reveal::{schedule_reveal, RevealTracker, Viewport};
use crate::view::{self, terminal};

const HELP: &str = "\
Commands:
  file <path>     select a resume (PDF only)
  desc <text>     replace the job description
  append <text>   add a line to the job description
  paste           enter a multi-line job description, finish with a lone `.`
  clear           empty the job description
  submit          analyze the resume against the job description
  show            redraw the form
  help            show this message
  quit            exit";

type Settlement = (u64, Result<AnalysisResult, AnalysisError>);

#[derive(Debug, Clone, PartialEq)]
enum Command {
    File(PathBuf),
    Describe(String),
    Append(String),
    Paste,
    Clear,
    Submit,
    Show,
    Help,
    Quit,
    Unknown(String),
    Empty,
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        let (word, rest) = match trimmed.split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (trimmed, ""),
        };

        match word {
            "" => Command::Empty,
            "file" if !rest.trim().is_empty() => Command::File(PathBuf::from(rest.trim())),
            "desc" => Command::Describe(rest.to_string()),
            "append" => Command::Append(rest.to_string()),
            "paste" => Command::Paste,
            "clear" => Command::Clear,
            "submit" => Command::Submit,
            "show" => Command::Show,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// One mounted submission view. Dropping it discards the submission state.
pub struct App {
    controller: SubmissionController,
    service: Arc<dyn AnalysisService>,
    viewport: Arc<dyn Viewport>,
    reveal_delay: Duration,
    reveal: RevealTracker,
    paste: Option<String>,
    settlements: (
        mpsc::UnboundedSender<Settlement>,
        mpsc::UnboundedReceiver<Settlement>,
    ),
    in_flight: usize,
}

impl App {
    pub fn new(
        service: Arc<dyn AnalysisService>,
        viewport: Arc<dyn Viewport>,
        reveal_delay: Duration,
    ) -> Self {
        Self {
            controller: SubmissionController::new(),
            service,
            viewport,
            reveal_delay,
            reveal: RevealTracker::default(),
            paste: None,
            settlements: mpsc::unbounded_channel(),
            in_flight: 0,
        }
    }

    /// Runs until `quit`, or until input ends and every in-flight request has settled.
    ///
    /// Input lines that are not valid UTF-8 are decoded lossily.
    pub async fn run<R, W>(mut self, mut input: R, mut out: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        // `read_until` keeps partial reads in `line` when another branch wins,
        // so it is only cleared once a full line has been handled.
        let mut line = Vec::new();
        let mut updates = self.controller.subscribe();
        let mut input_open = true;

        self.render(&mut out, &mut updates)?;
        writeln!(out, "Type `help` for commands.")?;

        loop {
            if !input_open && self.in_flight == 0 {
                if updates.has_changed()? {
                    self.render(&mut out, &mut updates)?;
                }
                break;
            }

            tokio::select! {
                read = input.read_until(b'\n', &mut line), if input_open => {
                    if read? == 0 {
                        debug!("Input closed");
                        input_open = false;
                        if line.is_empty() {
                            continue;
                        }
                    }
                    let text = decode_line(&line);
                    line.clear();
                    if let Flow::Quit = self.handle_line(&text, &mut out).await? {
                        break;
                    }
                }
                Some((id, outcome)) = self.settlements.1.recv(), if self.in_flight > 0 => {
                    self.in_flight -= 1;
                    self.controller.settle(id, outcome);
                }
                changed = updates.changed() => {
                    changed?;
                    self.render(&mut out, &mut updates)?;
                }
            }
        }

        Ok(())
    }

    fn render<W: Write>(
        &mut self,
        out: &mut W,
        updates: &mut watch::Receiver<SubmissionState>,
    ) -> Result<()> {
        let view = view::project(&updates.borrow_and_update());
        terminal::render(out, &view)?;

        if let Some(results) = self.reveal.observe(&view) {
            schedule_reveal(Arc::clone(&self.viewport), results.clone(), self.reveal_delay);
        }
        Ok(())
    }

    async fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        if let Some(buffer) = self.paste.as_mut() {
            if line.trim() == "." {
                let text = self.paste.take().unwrap_or_default();
                self.controller.edit_description(text);
            } else {
                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(line);
            }
            return Ok(Flow::Continue);
        }

        match Command::parse(line) {
            Command::File(path) => match picker::pick(&path).await {
                Ok(file) => self.controller.select_file(file),
                Err(e) => writeln!(out, "Cannot use that file: {e}")?,
            },
            Command::Describe(text) => self.controller.edit_description(text),
            Command::Append(text) => {
                let mut description = self.controller.state().job_description;
                if !description.is_empty() {
                    description.push('\n');
                }
                description.push_str(&text);
                self.controller.edit_description(description);
            }
            Command::Paste => {
                writeln!(out, "Paste the job description; finish with a line containing only `.`")?;
                self.paste = Some(String::new());
            }
            Command::Clear => self.controller.edit_description(String::new()),
            Command::Submit => self.submit(out)?,
            Command::Show => terminal::render(out, &view::project(&self.controller.state()))?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(text) => writeln!(out, "Unknown command: {text} (type `help`)")?,
            Command::Empty => {}
        }

        Ok(Flow::Continue)
    }

    fn submit<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let view = view::project(&self.controller.state());
        if !view.submit_enabled {
            writeln!(out, "{} wait for the current request to finish", view.submit_label)?;
            return Ok(());
        }

        if let Some(pending) = self.controller.begin_submit() {
            // a resubmission must reveal its results even if the cleared
            // snapshot is never rendered
            self.reveal.reset();
            self.in_flight += 1;
            let service = Arc::clone(&self.service);
            let settled = self.settlements.0.clone();
            tokio::spawn(async move {
                let outcome = service.analyze(pending.request).await;
                // the receiver is gone only once the app has quit
                let _ = settled.send((pending.id, outcome));
            });
        }
        Ok(())
    }
}

fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
