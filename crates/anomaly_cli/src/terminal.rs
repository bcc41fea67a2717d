//! Line-oriented views: status and trigger changes go to one writer, results
//! to another.
//!
//! The first failed write (usually a closed pipe) is logged once and every
//! later line is dropped. The driver polls `failure()` after each value and
//! stops.

use std::io::{self, Write};

use anomaly_demo::view::{Badge, Rendered, ResultView, StatusView, Tone};
use tracing::warn;

fn marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => "..",
        Tone::Ok => "ok",
        Tone::Warn => "!!",
    }
}

struct LineSink<W> {
    out: W,
    failed: Option<io::ErrorKind>,
}

impl<W: Write> LineSink<W> {
    fn new(out: W) -> Self {
        Self { out, failed: None }
    }

    fn line(&mut self, text: &str) {
        if self.failed.is_some() {
            return;
        }
        let res = writeln!(self.out, "{text}").and_then(|()| self.out.flush());
        if let Err(e) = res {
            warn!(error = %e, "terminal output failed; dropping further lines");
            self.failed = Some(e.kind());
        }
    }
}

pub struct TerminalStatus<W> {
    sink: LineSink<W>,
}

impl<W: Write> TerminalStatus<W> {
    pub fn new(out: W) -> Self {
        Self {
            sink: LineSink::new(out),
        }
    }

    pub fn failure(&self) -> Option<io::ErrorKind> {
        self.sink.failed
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.sink.out
    }
}

impl<W: Write> StatusView for TerminalStatus<W> {
    fn show_status(&mut self, badge: &Badge) {
        self.sink
            .line(&format!("[{}] status: {}", marker(badge.tone), badge.text));
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        let state = if enabled { "enabled" } else { "disabled" };
        self.sink.line(&format!("[..] trigger {state}"));
    }
}

pub struct TerminalResults<W> {
    sink: LineSink<W>,
}

impl<W: Write> TerminalResults<W> {
    pub fn new(out: W) -> Self {
        Self {
            sink: LineSink::new(out),
        }
    }

    pub fn failure(&self) -> Option<io::ErrorKind> {
        self.sink.failed
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.sink.out
    }
}

impl<W: Write> ResultView for TerminalResults<W> {
    fn show_result(&mut self, rendered: &Rendered) {
        self.sink
            .line(&format!("[{}] {}", marker(rendered.tone), rendered.text));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Writer whose reader went away; counts attempts.
    #[derive(Default)]
    pub(crate) struct ClosedPipe {
        pub(crate) attempts: usize,
    }

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn status_lines_carry_tone_marker() {
        let mut v = TerminalStatus::new(Vec::new());
        v.show_status(&Badge::initializing());
        v.set_trigger_enabled(false);
        v.show_status(&Badge::ready());
        v.set_trigger_enabled(true);

        assert_eq!(v.failure(), None);
        let text = String::from_utf8(v.get_ref().clone()).unwrap();
        assert_eq!(
            text,
            "[..] status: Initializing WASM...\n\
             [..] trigger disabled\n\
             [ok] status: Ready\n\
             [..] trigger enabled\n"
        );
    }

    #[test]
    fn result_lines_carry_tone_marker() {
        let mut v = TerminalResults::new(Vec::new());
        v.show_result(&Rendered::new("Anomaly detected at 5", Tone::Warn));
        v.show_result(&Rendered::new("No anomaly at 0.1", Tone::Ok));

        let text = String::from_utf8(v.get_ref().clone()).unwrap();
        assert_eq!(text, "[!!] Anomaly detected at 5\n[ok] No anomaly at 0.1\n");
    }

    #[test]
    fn closed_pipe_is_reported_and_later_lines_are_dropped() {
        let mut v = TerminalResults::new(ClosedPipe::default());
        v.show_result(&Rendered::new("No anomaly at 1", Tone::Ok));
        assert_eq!(v.failure(), Some(io::ErrorKind::BrokenPipe));

        v.show_result(&Rendered::new("No anomaly at 2", Tone::Ok));
        v.show_result(&Rendered::new("No anomaly at 3", Tone::Ok));
        assert_eq!(v.get_ref().attempts, 1);
    }
}
