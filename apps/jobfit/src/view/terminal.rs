use std::io::{self, Write};
use std::sync::Mutex;

use crate::view::reveal::Viewport;
use crate::view::{ResultsView, ViewModel};

const RULE: &str = "────────────────────────────────────────";

/// Writes the whole form: inputs, submit affordance, error region, results region.
pub fn render<W: Write>(out: &mut W, view: &ViewModel) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "JobFit AI")?;
    match &view.resume {
        Some((name, size)) => writeln!(out, "Resume (PDF):     {name} ({size} bytes)")?,
        None => writeln!(out, "Resume (PDF):     (none selected)")?,
    }
    if view.description_chars == 0 {
        writeln!(out, "Job Description:  (empty)")?;
    } else {
        writeln!(out, "Job Description:  {} characters", view.description_chars)?;
    }

    if view.submit_enabled {
        writeln!(out, "[ {} ]  (type `submit`)", view.submit_label)?;
    } else {
        writeln!(out, "[ {} ]", view.submit_label)?;
    }

    if let Some(error) = &view.error {
        writeln!(out, "Error: {error}")?;
    }

    if let Some(results) = &view.results {
        render_results(out, results)?;
    }
    out.flush()
}

pub fn render_results<W: Write>(out: &mut W, results: &ResultsView) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Results")?;
    writeln!(out, "Binary Classification: {}", results.classification)?;
    writeln!(out, "Job Role: {}", results.job_role)?;
    writeln!(out, "Match Score: {}", results.match_score)?;
    out.flush()
}

/// Reprints the results block so it sits at the bottom of the scrollback.
pub struct TerminalViewport<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalViewport<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl<W: Write + Send> Viewport for TerminalViewport<W> {
    fn scroll_into_view(&self, results: &ResultsView) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Err(e) = render_results(&mut *out, results) {
            tracing::warn!("Failed to reveal results: {e}");
        }
    }
}
