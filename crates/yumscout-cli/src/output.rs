//! Report rendering.
//!
//! Text output is the historical format: a `Domains:` header followed by one
//! indented domain per line. Only the report goes to stdout; logs go to
//! stderr.

use std::io::{self, Write};

use yumscout_core::WalkReport;

/// Output format for the walk report
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `Domains:` list (default)
    #[default]
    Text,
    /// Full report as a single JSON object
    Json,
}

/// Writes `report` to `out` in the requested format.
///
/// `show_urls` adds a `URLs:` section to text output; JSON always carries
/// the URL list.
pub fn render<W: Write>(
    report: &WalkReport,
    format: OutputFormat,
    show_urls: bool,
    out: &mut W,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => render_text(report, show_urls, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)
        },
    }
}

fn render_text<W: Write>(report: &WalkReport, show_urls: bool, out: &mut W) -> io::Result<()> {
    write_section(out, "Domains", &report.domains)?;
    if show_urls {
        write_section(out, "URLs", &report.urls)?;
    }
    Ok(())
}

fn write_section<W: Write>(out: &mut W, title: &str, items: &[String]) -> io::Result<()> {
    writeln!(out, "{title}:")?;
    for item in items {
        writeln!(out, "  {item}")?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> WalkReport {
        WalkReport {
            base_url: "http://a.test/repo/".to_string(),
            domains: vec!["a.test".to_string(), "b.test:8080".to_string()],
            urls: vec![
                "http://a.test/repo/repodata/repomd.xml".to_string(),
                "http://b.test:8080/primary.xml.gz".to_string(),
            ],
            packages: 0,
            failed_probes: Vec::new(),
        }
    }

    fn rendered(format: OutputFormat, show_urls: bool) -> String {
        let mut buf = Vec::new();
        render(&sample(), format, show_urls, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_lists_domains() {
        assert_eq!(
            rendered(OutputFormat::Text, false),
            "Domains:\n  a.test\n  b.test:8080\n"
        );
    }

    #[test]
    fn test_text_with_urls_section() {
        assert_eq!(
            rendered(OutputFormat::Text, true),
            "Domains:\n  a.test\n  b.test:8080\nURLs:\n  http://a.test/repo/repodata/repomd.xml\n  http://b.test:8080/primary.xml.gz\n"
        );
    }

    #[test]
    fn test_text_with_no_domains_prints_header_only() {
        let report = WalkReport {
            domains: Vec::new(),
            ..sample()
        };
        let mut buf = Vec::new();
        render(&report, OutputFormat::Text, false, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Domains:\n");
    }

    #[test]
    fn test_json_is_the_full_report() {
        let value: serde_json::Value =
            serde_json::from_str(&rendered(OutputFormat::Json, false)).unwrap();
        assert_eq!(value["base_url"], "http://a.test/repo/");
        assert_eq!(value["domains"][1], "b.test:8080");
        assert_eq!(value["urls"].as_array().unwrap().len(), 2);
        assert_eq!(value["packages"], 0);
    }
}
