//! WHOIS lookup module.

use regex::Regex;
use whois_rust::{WhoIs, WhoIsLookupOptions};

use crate::error::{ReconError, ReconResult};
use crate::types::{WhoisSummary, RAW_TEXT_CAP};

/// Perform a WHOIS lookup for a domain.
///
/// Client and transport failures are fatal. A reply whose text parses to no
/// fields (e.g. "No match for domain") still yields an empty summary.
pub async fn whois_lookup(domain: &str, whois_servers: &str) -> ReconResult<WhoisSummary> {
    let whois = WhoIs::from_string(whois_servers)
        .map_err(|e| ReconError::LookupError(format!("Failed to initialize WHOIS client: {e}")))?;

    let options = WhoIsLookupOptions::from_string(domain)
        .map_err(|e| ReconError::ValidationError(format!("Invalid domain: {e}")))?;

    let raw = whois
        .lookup_async(options)
        .await
        .map_err(|e| ReconError::LookupError(format!("WHOIS query failed: {e}")))?;

    Ok(parse_whois_response(domain, &raw))
}

/// Parse structured fields from a raw WHOIS response.
pub(crate) fn parse_whois_response(domain: &str, raw: &str) -> WhoisSummary {
    WhoisSummary {
        domain: domain.to_string(),
        registrar: extract_field(
            raw,
            &[
                r"(?i)Registrar:\s*(.+)",
                r"(?i)Registrar Name:\s*(.+)",
                r"(?i)Sponsoring Registrar:\s*(.+)",
            ],
        ),
        creation_date: extract_field(
            raw,
            &[
                r"(?i)Creation Date:\s*(.+)",
                r"(?i)Created Date:\s*(.+)",
                r"(?i)Created:\s*(.+)",
                r"(?i)Registration Time:\s*(.+)",
                r"(?i)Registration Date:\s*(.+)",
            ],
        ),
        updated_date: extract_field(
            raw,
            &[
                r"(?i)Updated Date:\s*(.+)",
                r"(?i)Last Updated:\s*(.+)",
                r"(?i)Last Modified:\s*(.+)",
            ],
        ),
        expiration_date: extract_field(
            raw,
            &[
                r"(?i)Expir(?:y|ation) Date:\s*(.+)",
                r"(?i)Registry Expiry Date:\s*(.+)",
                r"(?i)Expiration Time:\s*(.+)",
                r"(?i)paid-till:\s*(.+)",
            ],
        ),
        name_servers: extract_name_servers(raw),
        status: extract_status(raw),
        raw: raw.chars().take(RAW_TEXT_CAP).collect(),
    }
}

/// Try multiple regex patterns and return the first match.
fn extract_field(text: &str, patterns: &[&str]) -> Option<String> {
    for pattern in patterns {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(m) = re.captures(text).and_then(|caps| caps.get(1)) {
                let value = m.as_str().trim().to_string();
                if !value.is_empty() {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// Extract name servers from WHOIS text.
fn extract_name_servers(text: &str) -> Vec<String> {
    let mut servers = Vec::new();
    let patterns = [
        r"(?i)Name Server:\s*(.+)",
        r"(?i)nserver:\s*(.+)",
        r"(?i)DNS:\s*(.+)",
    ];

    for pattern in patterns {
        if let Ok(re) = Regex::new(pattern) {
            for caps in re.captures_iter(text) {
                if let Some(m) = caps.get(1) {
                    let server = m.as_str().trim().to_lowercase();
                    if !server.is_empty() && !servers.contains(&server) {
                        servers.push(server);
                    }
                }
            }
        }
    }

    servers
}

/// Extract domain status codes from WHOIS text.
fn extract_status(text: &str) -> Vec<String> {
    let mut statuses = Vec::new();
    let patterns = [
        r"(?i)Domain Status:\s*(.+)",
        r"(?i)Status:\s*(.+)",
        r"(?i)state:\s*(.+)",
    ];

    for pattern in patterns {
        if let Ok(re) = Regex::new(pattern) {
            for caps in re.captures_iter(text) {
                if let Some(m) = caps.get(1) {
                    let status = m.as_str().trim().to_string();
                    let status = status
                        .split_whitespace()
                        .next()
                        .unwrap_or(&status)
                        .to_string();
                    if !status.is_empty() && !statuses.contains(&status) {
                        statuses.push(status);
                    }
                }
            }
        }
    }

    statuses
}
