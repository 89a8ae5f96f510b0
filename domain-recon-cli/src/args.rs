//! Command-line argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// WHOIS + DNS reconnaissance for a single domain
///
/// Looks up WHOIS registration data and a fixed set of DNS record types,
/// prints the combined report and writes `<domain>.csv` / `<domain>.json`.
/// Without `--domain` the tool prompts for one interactively.
#[derive(Parser, Debug)]
#[command(name = "domain-recon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Domain to look up (prompted for interactively when omitted)
    #[arg(short, long, value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Custom DNS server IP to resolve against (system default when omitted)
    #[arg(short, long, value_name = "IP")]
    pub nameserver: Option<String>,

    /// Directory the CSV/JSON exports are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Stdout rendering
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tables and colored sections
    #[default]
    Pretty,
    /// The report as pretty-printed JSON
    Json,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_flags_is_valid() {
        let cli = Cli::try_parse_from(["domain-recon"]).unwrap();
        assert!(cli.domain.is_none());
        assert!(cli.nameserver.is_none());
        assert_eq!(cli.out_dir, PathBuf::from("."));
        assert!(cli.format.is_none());
    }

    #[test]
    fn test_parse_short_domain_flag() {
        let cli = Cli::try_parse_from(["domain-recon", "-d", "example.com"]).unwrap();
        assert_eq!(cli.domain.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "domain-recon",
            "--domain",
            "example.com",
            "--nameserver",
            "8.8.8.8",
            "--out-dir",
            "/tmp/scans",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.domain.as_deref(), Some("example.com"));
        assert_eq!(cli.nameserver.as_deref(), Some("8.8.8.8"));
        assert_eq!(cli.out_dir, PathBuf::from("/tmp/scans"));
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["domain-recon", "-f", "yaml"]).is_err());
    }
}
