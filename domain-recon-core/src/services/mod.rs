//! Stateless service façade running the recon pipeline.

mod dns;
mod resolver;
mod whois;

use std::net::IpAddr;

use chrono::Utc;

use crate::error::{ReconError, ReconResult};
use crate::types::ReconReport;

/// Validate and normalise a domain name or IP address input.
///
/// Trims whitespace, passes through valid IP addresses unchanged, converts
/// internationalised domain names (IDN) to ASCII via IDNA 2008, and rejects
/// empty or overlong inputs. This is the gate [`ReconService::run`] applies
/// before any network I/O; front-ends that derive file names from a
/// user-supplied domain must pass it through here first, since the strict
/// IDNA mapping also rejects path separators and other non-hostname bytes.
pub fn validate_domain(domain: &str) -> ReconResult<String> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(ReconError::ValidationError(
            "Domain name is required".to_string(),
        ));
    }
    // If it's a valid IP address, pass through without IDNA processing.
    if domain.parse::<IpAddr>().is_ok() {
        return Ok(domain.to_string());
    }
    // IDNA processing: converts Unicode labels to Punycode and validates.
    let ascii_domain = idna::domain_to_ascii_strict(domain)
        .map_err(|_| ReconError::ValidationError(format!("Invalid domain name: {domain}")))?;
    if ascii_domain.len() > 253 {
        return Err(ReconError::ValidationError(format!(
            "Domain name exceeds maximum length of 253 characters (got {})",
            ascii_domain.len()
        )));
    }
    Ok(ascii_domain)
}

/// Parse an optional custom nameserver into an IP address.
fn parse_nameserver(nameserver: Option<&str>) -> ReconResult<Option<IpAddr>> {
    match nameserver.map(str::trim) {
        None | Some("") => Ok(None),
        Some(ns) => ns
            .parse::<IpAddr>()
            .map(Some)
            .map_err(|_| ReconError::ValidationError(format!("Invalid DNS server address: {ns}"))),
    }
}

/// Embedded WHOIS server mapping (TLD → server).
const WHOIS_SERVERS: &str = include_str!("whois_servers.json");

/// Entry point for recon runs.
///
/// The service is stateless — [`run`](Self::run) is an associated function,
/// no instance needed.
///
/// ```rust,no_run
/// use domain_recon_core::ReconService;
/// # async fn demo() -> domain_recon_core::ReconResult<()> {
/// let report = ReconService::run("example.com", None).await?;
/// println!("{} record lists gathered", report.dns.len());
/// # Ok(())
/// # }
/// ```
pub struct ReconService;

impl ReconService {
    /// Run the full recon pipeline for one domain.
    ///
    /// Validates the input, performs the WHOIS lookup, gathers DNS records
    /// for every queried type one after another, derives the SPF/DMARC
    /// entries, and assembles the immutable [`ReconReport`].
    ///
    /// Pass `None` for `nameserver` to use the system default resolver.
    ///
    /// # Errors
    ///
    /// - [`ReconError::ValidationError`] when the domain or nameserver is
    ///   rejected before any network I/O;
    /// - [`ReconError::LookupError`] when the WHOIS query fails or every DNS
    ///   record type fails to resolve. A record type that merely has no
    ///   records is not an error — its list in the report stays empty.
    pub async fn run(domain: &str, nameserver: Option<&str>) -> ReconResult<ReconReport> {
        let domain = validate_domain(domain)?;
        let ns_ip = parse_nameserver(nameserver)?;

        log::info!("Starting recon for {domain}");

        let whois = whois::whois_lookup(&domain, WHOIS_SERVERS).await?;
        log::debug!(
            "WHOIS answered for {domain} (registrar: {})",
            whois.registrar.as_deref().unwrap_or("unknown")
        );

        let gathered = dns::gather_records(&domain, ns_ip).await?;
        log::debug!(
            "DNS gathering finished for {domain} via {}",
            gathered.nameserver
        );

        Ok(ReconReport {
            domain,
            whois,
            dns: gathered.records,
            nameserver: gathered.nameserver,
            queried_at: Utc::now(),
        })
    }
}
