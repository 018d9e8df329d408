use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use reqtrace_core::Quoting;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Extract a requirements traceability graph from a workbook and export it as CSV"
)]
pub struct Cli {
    /// Path to the requirements workbook (.xlsx, .xlsm, .xls or .ods)
    pub workbook: PathBuf,

    /// Output file (prompted for when omitted)
    #[clap(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Output format
    #[clap(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Write CSV fields verbatim without quoting
    #[clap(long)]
    pub no_quote: bool,

    /// Take the first candidate text instead of prompting
    #[clap(long)]
    pub first: bool,

    /// Column-name config file (YAML)
    #[clap(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[clap(long, short = 'v')]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl Cli {
    pub fn quoting(&self) -> Quoting {
        if self.no_quote {
            Quoting::Never
        } else {
            Quoting::Necessary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["reqtrace", "reqs.xlsx"]).unwrap();

        assert_eq!(cli.workbook, PathBuf::from("reqs.xlsx"));
        assert_eq!(cli.format, ExportFormat::Csv);
        assert_eq!(cli.quoting(), Quoting::Necessary);
        assert!(cli.output.is_none());
        assert!(!cli.first);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "reqtrace", "reqs.xlsx", "-o", "out.json", "--format", "json", "--no-quote",
            "--first", "-c", "cols.yaml", "-v",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert_eq!(cli.format, ExportFormat::Json);
        assert_eq!(cli.quoting(), Quoting::Never);
        assert!(cli.first);
        assert_eq!(cli.config, Some(PathBuf::from("cols.yaml")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_workbook_required() {
        assert!(Cli::try_parse_from(["reqtrace"]).is_err());
    }
}
