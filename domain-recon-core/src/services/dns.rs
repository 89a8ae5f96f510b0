//! Sequential DNS record gathering.

use std::net::IpAddr;

use hickory_resolver::{proto::rr::RecordType, ResolveError, TokioResolver};

use crate::error::{ReconError, ReconResult};
use crate::types::{DnsRecordSet, DnsRecordType, QUERY_RECORD_TYPES};

use super::resolver::{build_resolver_for_ns, DEFAULT_RESOLVER, SYSTEM_DNS_LABEL};

/// Record set gathered for one domain, plus the resolver label that answered.
pub(crate) struct GatheredRecords {
    /// The custom nameserver IP when one was supplied, else the system DNS label.
    pub(crate) nameserver: String,
    /// One rendered value list per record type (all types present).
    pub(crate) records: DnsRecordSet,
}

/// Classified outcome of one record-type query.
#[derive(Debug, PartialEq, Eq)]
enum LookupOutcome {
    /// The query answered with records; rendered values.
    Records(Vec<String>),
    /// Transport-successful reply carrying no records of this type.
    NoAnswer,
    /// NXDOMAIN, timeout, refusal or any other resolution failure.
    HardFailure { nx_domain: bool, error: String },
}

impl LookupOutcome {
    fn from_result(result: Result<Vec<String>, ResolveError>) -> Self {
        match result {
            Ok(values) => Self::Records(values),
            Err(e) => Self::from_failure(e.is_no_records_found(), e.is_nx_domain(), e.to_string()),
        }
    }

    /// A no-records reply that is not NXDOMAIN is the tolerated empty case;
    /// everything else counts as a hard failure.
    fn from_failure(no_records: bool, nx_domain: bool, error: String) -> Self {
        if no_records && !nx_domain {
            Self::NoAnswer
        } else {
            Self::HardFailure { nx_domain, error }
        }
    }
}

/// The fatal error for a run where every queried type failed hard, or `None`
/// while at least one type got through. NXDOMAIN wording wins when the name
/// does not exist.
fn total_failure(domain: &str, hard_failures: usize, nx_domain: bool) -> Option<ReconError> {
    if hard_failures < QUERY_RECORD_TYPES.len() {
        return None;
    }
    Some(if nx_domain {
        ReconError::LookupError(format!("Domain does not exist: {domain} (NXDOMAIN)"))
    } else {
        ReconError::LookupError(format!(
            "DNS resolution failed for every record type of {domain}"
        ))
    })
}

/// Query every type in [`QUERY_RECORD_TYPES`] one after another, then derive
/// the SPF and DMARC entries from TXT answers.
///
/// A type with no answer keeps an empty list. A type that fails hard
/// (NXDOMAIN, timeout, refused) also keeps an empty list and is logged; only
/// when every queried type fails hard does the whole gather fail.
pub(crate) async fn gather_records(
    domain: &str,
    ns_ip: Option<IpAddr>,
) -> ReconResult<GatheredRecords> {
    let custom = ns_ip.map(build_resolver_for_ns);
    let resolver: &TokioResolver = custom.as_ref().unwrap_or(&*DEFAULT_RESOLVER);
    let nameserver = ns_ip.map_or_else(|| SYSTEM_DNS_LABEL.clone(), |ip| ip.to_string());

    let mut records = DnsRecordSet::new();
    let mut hard_failures = 0;
    let mut nx_domain = false;

    for record_type in QUERY_RECORD_TYPES {
        match LookupOutcome::from_result(lookup_type(resolver, domain, record_type).await) {
            LookupOutcome::Records(values) => {
                records.insert(record_type, values);
            }
            LookupOutcome::NoAnswer => {
                records.insert(record_type, Vec::new());
            }
            LookupOutcome::HardFailure { nx_domain: nx, error } => {
                log::warn!("{record_type} lookup for {domain} failed: {error}");
                nx_domain |= nx;
                hard_failures += 1;
                records.insert(record_type, Vec::new());
            }
        }
    }

    if let Some(e) = total_failure(domain, hard_failures, nx_domain) {
        return Err(e);
    }

    let spf = records
        .get(&DnsRecordType::Txt)
        .map(|txt| filter_policy_records(txt, "v=spf1"))
        .unwrap_or_default();
    records.insert(DnsRecordType::Spf, spf);

    let dmarc_host = format!("_dmarc.{domain}");
    let dmarc = match lookup_type(resolver, &dmarc_host, DnsRecordType::Txt).await {
        Ok(values) => filter_policy_records(&values, "v=dmarc1"),
        Err(e) => {
            if !e.is_no_records_found() {
                log::warn!("DMARC TXT lookup for {dmarc_host} failed: {e}");
            }
            Vec::new()
        }
    };
    records.insert(DnsRecordType::Dmarc, dmarc);

    Ok(GatheredRecords {
        nameserver,
        records,
    })
}

/// Rendered values for one record type.
///
/// MX values are `"<preference> <exchange>"`; MX/NS/CNAME names have the
/// trailing dot trimmed; TXT character strings are concatenated per record.
async fn lookup_type(
    resolver: &TokioResolver,
    domain: &str,
    record_type: DnsRecordType,
) -> Result<Vec<String>, ResolveError> {
    match record_type {
        DnsRecordType::A => {
            let response = resolver.ipv4_lookup(domain).await?;
            Ok(response.iter().map(|ip| ip.to_string()).collect())
        }
        DnsRecordType::Aaaa => {
            let response = resolver.ipv6_lookup(domain).await?;
            Ok(response.iter().map(|ip| ip.to_string()).collect())
        }
        DnsRecordType::Mx => {
            let response = resolver.mx_lookup(domain).await?;
            Ok(response
                .iter()
                .map(|mx| {
                    format!(
                        "{} {}",
                        mx.preference(),
                        mx.exchange().to_string().trim_end_matches('.')
                    )
                })
                .collect())
        }
        DnsRecordType::Txt => {
            let response = resolver.txt_lookup(domain).await?;
            Ok(response
                .iter()
                .map(|txt| {
                    txt.iter()
                        .map(|data| String::from_utf8_lossy(data).to_string())
                        .collect::<String>()
                })
                .collect())
        }
        DnsRecordType::Ns => {
            let response = resolver.ns_lookup(domain).await?;
            Ok(response
                .iter()
                .map(|ns| ns.to_string().trim_end_matches('.').to_string())
                .collect())
        }
        DnsRecordType::Cname => {
            let response = resolver.lookup(domain, RecordType::CNAME).await?;
            Ok(response
                .record_iter()
                .filter_map(|record| record.data().as_cname())
                .map(|cname| cname.0.to_string().trim_end_matches('.').to_string())
                .collect())
        }
        // Derived entries are filtered from TXT answers, never queried directly.
        DnsRecordType::Spf | DnsRecordType::Dmarc => Ok(Vec::new()),
    }
}

/// Keep the TXT values that start with the given policy tag (case-insensitive).
fn filter_policy_records(values: &[String], prefix: &str) -> Vec<String> {
    values
        .iter()
        .filter(|v| v.to_lowercase().starts_with(prefix))
        .cloned()
        .collect()
}
