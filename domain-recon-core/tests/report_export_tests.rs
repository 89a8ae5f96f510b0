#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for report export: CSV layout, JSON round-trip and
//! overwrite-on-rerun behavior.

use chrono::Utc;
use domain_recon_core::export;
use domain_recon_core::{
    DnsRecordSet, DnsRecordType, ReconReport, WhoisSummary, QUERY_RECORD_TYPES,
};

// ===== Helpers =====

/// A report with every record type present, some of them empty.
fn full_report(domain: &str) -> ReconReport {
    let mut dns = DnsRecordSet::new();
    dns.insert(
        DnsRecordType::A,
        vec!["93.184.216.34".to_string(), "93.184.216.35".to_string()],
    );
    dns.insert(DnsRecordType::Aaaa, vec!["2606:2800:220:1::1".to_string()]);
    dns.insert(
        DnsRecordType::Mx,
        vec!["10 mail.example.com".to_string(), "20 mail2.example.com".to_string()],
    );
    dns.insert(
        DnsRecordType::Txt,
        vec!["v=spf1 -all".to_string(), "verification=abc123".to_string()],
    );
    dns.insert(
        DnsRecordType::Ns,
        vec!["a.iana-servers.net".to_string(), "b.iana-servers.net".to_string()],
    );
    dns.insert(DnsRecordType::Cname, vec![]);
    dns.insert(DnsRecordType::Spf, vec!["v=spf1 -all".to_string()]);
    dns.insert(DnsRecordType::Dmarc, vec![]);

    ReconReport {
        domain: domain.to_string(),
        whois: WhoisSummary {
            domain: domain.to_string(),
            registrar: Some("Example Registrar, Inc.".to_string()),
            creation_date: Some("1995-08-14T04:00:00Z".to_string()),
            updated_date: None,
            expiration_date: Some("2026-08-13T04:00:00Z".to_string()),
            name_servers: vec![
                "a.iana-servers.net".to_string(),
                "b.iana-servers.net".to_string(),
            ],
            status: vec!["clientDeleteProhibited".to_string()],
            raw: "Domain Name: EXAMPLE.COM\r\n".to_string(),
        },
        dns,
        nameserver: "System".to_string(),
        queried_at: Utc::now(),
    }
}

/// Parse a written CSV back into `(section, key, value)` rows, header excluded.
fn read_csv_rows(path: &std::path::Path) -> Vec<(String, String, String)> {
    let mut reader = csv::Reader::from_path(path).expect("failed to open csv");
    reader
        .records()
        .map(|record| {
            let record = record.expect("failed to read csv record");
            (
                record[0].to_string(),
                record[1].to_string(),
                record[2].to_string(),
            )
        })
        .collect()
}

// ===== CSV Export Tests =====

#[test]
fn csv_contains_every_whois_field() {
    let dir = tempfile::tempdir().unwrap();
    let report = full_report("example.com");
    let path = export::write_csv(&report, dir.path()).unwrap();

    let rows = read_csv_rows(&path);
    let whois_keys: Vec<&str> = rows
        .iter()
        .filter(|(section, _, _)| section == "WHOIS")
        .map(|(_, key, _)| key.as_str())
        .collect();

    let expected: Vec<&str> = report.whois.fields().iter().map(|(key, _)| *key).collect();
    assert_eq!(whois_keys, expected);
}

#[test]
fn csv_renders_lists_and_missing_values() {
    let dir = tempfile::tempdir().unwrap();
    let report = full_report("example.com");
    let path = export::write_csv(&report, dir.path()).unwrap();

    let rows = read_csv_rows(&path);
    let value_of = |wanted: &str| -> String {
        rows.iter()
            .find(|(section, key, _)| section == "WHOIS" && key == wanted)
            .map(|(_, _, value)| value.clone())
            .unwrap_or_else(|| panic!("missing WHOIS row: {wanted}"))
    };

    assert_eq!(
        value_of("name_servers"),
        "a.iana-servers.net;b.iana-servers.net"
    );
    assert_eq!(value_of("updated_date"), "-");
    assert_eq!(value_of("status"), "clientDeleteProhibited");
}

#[test]
fn csv_dns_rows_cover_all_record_types() {
    let dir = tempfile::tempdir().unwrap();
    let report = full_report("example.com");
    let path = export::write_csv(&report, dir.path()).unwrap();

    let rows = read_csv_rows(&path);
    let dns_rows: Vec<&(String, String, String)> = rows
        .iter()
        .filter(|(section, _, _)| section == "DNS")
        .collect();

    // Every stored record type appears, queried or derived.
    for record_type in QUERY_RECORD_TYPES {
        assert!(
            dns_rows.iter().any(|(_, key, _)| key == &record_type.to_string()),
            "missing DNS rows for {record_type}"
        );
    }
    assert!(dns_rows.iter().any(|(_, key, _)| key == "SPF"));
    assert!(dns_rows.iter().any(|(_, key, _)| key == "DMARC"));

    // One row per value, a single "-" row for empty types.
    let a_rows: Vec<_> = dns_rows.iter().filter(|(_, key, _)| key == "A").collect();
    assert_eq!(a_rows.len(), 2);
    let cname_rows: Vec<_> = dns_rows
        .iter()
        .filter(|(_, key, _)| key == "CNAME")
        .collect();
    assert_eq!(cname_rows.len(), 1);
    assert_eq!(cname_rows[0].2, "-");
}

// ===== JSON Export Tests =====

#[test]
fn json_roundtrip_preserves_report() {
    let dir = tempfile::tempdir().unwrap();
    let report = full_report("example.com");
    let path = export::write_json(&report, dir.path()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: ReconReport = serde_json::from_str(&content).unwrap();

    assert_eq!(parsed.domain, report.domain);
    assert_eq!(parsed.whois.registrar, report.whois.registrar);
    assert_eq!(parsed.dns, report.dns);
    assert_eq!(parsed.nameserver, report.nameserver);
    assert_eq!(parsed.queried_at, report.queried_at);
}

#[test]
fn json_uses_camel_case_keys() {
    let dir = tempfile::tempdir().unwrap();
    let report = full_report("example.com");
    let path = export::write_json(&report, dir.path()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"queriedAt\""));
    assert!(content.contains("\"nameServers\""));
    assert!(!content.contains("\"queried_at\""));
}

// ===== Overwrite Tests =====

#[test]
fn rerun_overwrites_previous_files() {
    let dir = tempfile::tempdir().unwrap();

    let first = full_report("example.com");
    let (csv_path, json_path) = export::write_all(&first, dir.path()).unwrap();
    let first_rows = read_csv_rows(&csv_path).len();

    let mut second = full_report("example.com");
    second.dns.insert(DnsRecordType::A, vec![]);
    second.dns.insert(DnsRecordType::Txt, vec![]);
    let (csv_again, json_again) = export::write_all(&second, dir.path()).unwrap();

    assert_eq!(csv_path, csv_again);
    assert_eq!(json_path, json_again);

    // Fewer values in the second run must mean fewer rows, not appended ones.
    let second_rows = read_csv_rows(&csv_again).len();
    assert!(second_rows < first_rows);

    let parsed: ReconReport =
        serde_json::from_str(&std::fs::read_to_string(&json_again).unwrap()).unwrap();
    assert!(parsed.dns[&DnsRecordType::A].is_empty());
}

#[test]
fn ipv6_target_gets_safe_filenames() {
    let dir = tempfile::tempdir().unwrap();
    let report = full_report("2606:4700::1111");
    let (csv_path, json_path) = export::write_all(&report, dir.path()).unwrap();

    assert_eq!(csv_path.file_name().unwrap(), "2606_4700__1111.csv");
    assert_eq!(json_path.file_name().unwrap(), "2606_4700__1111.json");
    assert!(csv_path.exists());
    assert!(json_path.exists());
}
