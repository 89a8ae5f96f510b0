//! Terminal rendering of recon reports.

use colored::Colorize;
use domain_recon_core::{DnsRecordType, ReconReport, QUERY_RECORD_TYPES};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct WhoisRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct DnsRow {
    #[tabled(rename = "Type")]
    record_type: String,
    #[tabled(rename = "Values")]
    values: String,
}

/// Render the full report for the terminal: header, WHOIS table, DNS table
/// and the SPF/DMARC sections.
pub fn render_pretty(report: &ReconReport) -> String {
    [
        header(report),
        whois_table(report),
        dns_table(report),
        policy_sections(report),
    ]
    .join("\n")
}

fn header(report: &ReconReport) -> String {
    format!(
        "{} {}\n{} {}  {} {}\n",
        "Domain:".bold(),
        report.domain.cyan().bold(),
        "Resolver:".bold(),
        report.nameserver,
        "Queried:".bold(),
        report.queried_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

fn whois_table(report: &ReconReport) -> String {
    fn opt(value: Option<&String>) -> String {
        value.cloned().unwrap_or_else(|| "-".to_string())
    }
    fn list(values: &[String]) -> String {
        if values.is_empty() {
            "-".to_string()
        } else {
            values.join(", ")
        }
    }

    let whois = &report.whois;
    let rows = vec![
        WhoisRow {
            field: "Registrar",
            value: opt(whois.registrar.as_ref()),
        },
        WhoisRow {
            field: "Created",
            value: opt(whois.creation_date.as_ref()),
        },
        WhoisRow {
            field: "Updated",
            value: opt(whois.updated_date.as_ref()),
        },
        WhoisRow {
            field: "Expires",
            value: opt(whois.expiration_date.as_ref()),
        },
        WhoisRow {
            field: "Name Servers",
            value: list(&whois.name_servers),
        },
        WhoisRow {
            field: "Status",
            value: list(&whois.status),
        },
    ];
    let table = Table::new(&rows).with(Style::rounded()).to_string();
    format!("{}\n{table}\n", "WHOIS".bold().underline())
}

fn dns_table(report: &ReconReport) -> String {
    let rows: Vec<DnsRow> = QUERY_RECORD_TYPES
        .iter()
        .map(|record_type| {
            let values = report
                .dns
                .get(record_type)
                .filter(|values| !values.is_empty())
                .map_or_else(|| "-".to_string(), |values| values.join(", "));
            DnsRow {
                record_type: record_type.to_string(),
                values,
            }
        })
        .collect();
    let table = Table::new(&rows).with(Style::rounded()).to_string();
    format!("{}\n{table}\n", "DNS Records".bold().underline())
}

fn policy_sections(report: &ReconReport) -> String {
    let spf = policy_section(
        "SPF (TXT)",
        report.dns.get(&DnsRecordType::Spf),
        "No SPF record found".to_string(),
    );
    let dmarc = policy_section(
        "DMARC (TXT)",
        report.dns.get(&DnsRecordType::Dmarc),
        format!("No DMARC record found at _dmarc.{}", report.domain),
    );
    format!("{spf}\n{dmarc}")
}

fn policy_section(title: &str, values: Option<&Vec<String>>, missing: String) -> String {
    let body = match values {
        Some(values) if !values.is_empty() => values
            .iter()
            .map(|value| format!("  {}", value.green()))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => format!("  {}", missing.yellow()),
    };
    format!("{}\n{body}\n", title.bold().underline())
}
