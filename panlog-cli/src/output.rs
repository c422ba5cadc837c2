//! Report rendering for `--output text|json`

use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Human-readable form of a report. JSON comes from `Serialize`.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}

impl OutputFormat {
    /// Write `report` in this format. JSON is pretty-printed and newline-terminated.
    pub fn render<T: Render + Serialize>(self, report: &T, w: &mut dyn Write) -> Result<(), CliError> {
        match self {
            OutputFormat::Text => report.render_text(w)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, report)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct DropReport {
        reason: &'static str,
        count: usize,
    }

    impl Render for DropReport {
        fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
            writeln!(w, "{}: {}", self.reason, self.count)
        }
    }

    const REPORT: DropReport = DropReport {
        reason: "unknown_category",
        count: 3,
    };

    #[test]
    fn test_text_uses_render_impl() {
        let mut buf = Vec::new();
        OutputFormat::Text.render(&REPORT, &mut buf).expect("render");
        assert_eq!(buf, b"unknown_category: 3\n");
    }

    #[test]
    fn test_json_is_newline_terminated() {
        let mut buf = Vec::new();
        OutputFormat::Json.render(&REPORT, &mut buf).expect("render");
        assert!(buf.ends_with(b"}\n"));

        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value["reason"], "unknown_category");
        assert_eq!(value["count"], 3);
    }
}
