//! CLI output for order checks
//!
//! Violation lines and the completion marker are written to the report
//! writer (stdout in the binary). Colors are only used when stdout is a
//! terminal, so piped output stays byte-for-byte plain.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use order_check_core::{OrderChecker, OrderViolation};

/// Printed once, after every violation line
pub const COMPLETION_MARKER: &str = "Check complete";

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum OutputLevel {
    /// Only the completion marker, plus a summary on stderr
    Quiet,
    /// Violation lines and the completion marker (default)
    #[default]
    Normal,
    /// Also show record ids and times for each violation, plus a summary
    Verbose,
}

/// Run details shown in the summary
#[derive(Debug, Clone)]
pub struct RunInfo<'a> {
    pub source: &'a str,
    pub records_scanned: usize,
    pub checker: OrderChecker,
}

#[derive(Debug)]
pub struct CliOutput<W: Write> {
    level: OutputLevel,
    use_colors: bool,
    out: W,
    violations: usize,
}

impl CliOutput<io::Stdout> {
    pub fn stdout(level: OutputLevel) -> Self {
        Self::new(level, io::stdout()).with_colors(atty::is(atty::Stream::Stdout))
    }
}

impl<W: Write> CliOutput<W> {
    pub fn new(level: OutputLevel, out: W) -> Self {
        Self {
            level,
            use_colors: false,
            out,
            violations: 0,
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn level(&self) -> OutputLevel {
        self.level
    }

    /// Violations reported so far, including suppressed ones
    pub fn violation_count(&self) -> usize {
        self.violations
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ANSI Color Codes
    // ═══════════════════════════════════════════════════════════════════════════

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    fn red(&self, text: &str) -> String {
        self.paint("31", text)
    }

    fn green(&self, text: &str) -> String {
        self.paint("32", text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Report Lines
    // ═══════════════════════════════════════════════════════════════════════════

    /// Report one violation
    pub fn violation(&mut self, violation: &OrderViolation) -> io::Result<()> {
        self.violations += 1;
        if self.level < OutputLevel::Normal {
            return Ok(());
        }

        let line = self.red(&violation.to_string());
        writeln!(self.out, "{}", line)?;

        if self.level >= OutputLevel::Verbose {
            let detail = format!(
                "    {} ({}) -> {} ({})",
                violation.previous_id,
                format_millis(violation.previous),
                violation.current_id,
                format_millis(violation.current)
            );
            let detail = self.dim(&detail);
            writeln!(self.out, "{}", detail)?;
        }
        Ok(())
    }

    /// Emit the completion marker and flush
    pub fn complete(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", COMPLETION_MARKER)?;
        self.out.flush()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Summary Report
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn summary_lines(&self, info: &RunInfo<'_>) -> Vec<String> {
        let line = "═".repeat(51);
        let status = if self.violations == 0 {
            self.green("SORTED")
        } else {
            self.red(&format!("{} VIOLATION(S)", self.violations))
        };

        vec![
            line.clone(),
            "  ORDER CHECK SUMMARY".to_string(),
            line.clone(),
            format!("Source:      {}", info.source),
            format!("Records:     {}", info.records_scanned),
            format!("Direction:   {:?}", info.checker.direction),
            format!("Baseline:    {:?}", info.checker.baseline),
            format!("Result:      {}", status),
            line,
        ]
    }

    /// Print the summary to stderr
    pub fn print_summary(&self, info: &RunInfo<'_>) {
        eprintln!();
        for line in self.summary_lines(info) {
            eprintln!("{}", line);
        }
    }
}

/// Render epoch milliseconds as a UTC time, or the raw value if out of range
fn format_millis(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_check_core::{Baseline, Direction};

    fn violation(index: usize, current: i64, previous: i64) -> OrderViolation {
        OrderViolation {
            index,
            current,
            previous,
            current_id: "b".to_string(),
            previous_id: "a".to_string(),
            direction: Direction::Descending,
        }
    }

    fn rendered(output: CliOutput<Vec<u8>>) -> String {
        String::from_utf8(output.into_inner()).unwrap()
    }

    #[test]
    fn test_normal_output_is_plain() {
        let mut output = CliOutput::new(OutputLevel::Normal, Vec::new());
        output.violation(&violation(1, 100, 90)).unwrap();
        output.complete().unwrap();

        assert_eq!(
            rendered(output),
            "Order violation at index 1: 100 > 90\nCheck complete\n"
        );
    }

    #[test]
    fn test_quiet_suppresses_violation_lines() {
        let mut output = CliOutput::new(OutputLevel::Quiet, Vec::new());
        output.violation(&violation(1, 100, 90)).unwrap();
        output.violation(&violation(3, 70, 60)).unwrap();
        output.complete().unwrap();

        assert_eq!(output.violation_count(), 2);
        assert_eq!(rendered(output), "Check complete\n");
    }

    #[test]
    fn test_verbose_adds_detail_line() {
        let mut output = CliOutput::new(OutputLevel::Verbose, Vec::new());
        output
            .violation(&violation(1, 1766321389000, 1766317926000))
            .unwrap();
        let text = rendered(output);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "    a (2025-12-21 11:52:06.000 UTC) -> b (2025-12-21 12:49:49.000 UTC)"
        );
    }

    #[test]
    fn test_colors_wrap_violation_line() {
        let mut output = CliOutput::new(OutputLevel::Normal, Vec::new()).with_colors(true);
        output.violation(&violation(1, 100, 90)).unwrap();

        assert_eq!(
            rendered(output),
            "\x1b[31mOrder violation at index 1: 100 > 90\x1b[0m\n"
        );
    }

    #[test]
    fn test_summary_lines() {
        let mut output = CliOutput::new(OutputLevel::Quiet, Vec::new());
        let info = RunInfo {
            source: "bundled dataset",
            records_scanned: 3,
            checker: OrderChecker::new(Direction::Descending, Baseline::Running),
        };

        let lines = output.summary_lines(&info);
        assert!(lines.contains(&"Records:     3".to_string()));
        assert!(lines.contains(&"Baseline:    Running".to_string()));
        assert!(lines.contains(&"Result:      SORTED".to_string()));

        output.violation(&violation(1, 100, 90)).unwrap();
        let lines = output.summary_lines(&info);
        assert!(lines.contains(&"Result:      1 VIOLATION(S)".to_string()));
    }

    #[test]
    fn test_format_millis_out_of_range() {
        assert_eq!(format_millis(i64::MAX), i64::MAX.to_string());
        assert_eq!(format_millis(0), "1970-01-01 00:00:00.000 UTC");
    }
}
