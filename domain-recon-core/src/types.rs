//! Public types produced by recon runs.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of characters of raw WHOIS text kept on a report.
pub const RAW_TEXT_CAP: usize = 2000;

/// DNS record type collected for a report.
///
/// Declaration order is presentation order: the directly queried types first,
/// then the entries derived from TXT answers ([`Spf`](Self::Spf) and
/// [`Dmarc`](Self::Dmarc)). `Ord` follows declaration order so a
/// [`DnsRecordSet`] iterates in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Canonical name (alias) record.
    Cname,
    /// Sender Policy Framework entry, derived from TXT answers.
    Spf,
    /// DMARC policy entry, derived from the `_dmarc` TXT answers.
    Dmarc,
}

/// Record types queried directly, in query order.
///
/// `SPF` and `DMARC` never appear here — they are derived from TXT answers
/// rather than queried as their own types.
pub const QUERY_RECORD_TYPES: [DnsRecordType; 6] = [
    DnsRecordType::A,
    DnsRecordType::Aaaa,
    DnsRecordType::Mx,
    DnsRecordType::Txt,
    DnsRecordType::Ns,
    DnsRecordType::Cname,
];

impl fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::Aaaa => write!(f, "AAAA"),
            Self::Mx => write!(f, "MX"),
            Self::Txt => write!(f, "TXT"),
            Self::Ns => write!(f, "NS"),
            Self::Cname => write!(f, "CNAME"),
            Self::Spf => write!(f, "SPF"),
            Self::Dmarc => write!(f, "DMARC"),
        }
    }
}

impl FromStr for DnsRecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "MX" => Ok(Self::Mx),
            "TXT" => Ok(Self::Txt),
            "NS" => Ok(Self::Ns),
            "CNAME" => Ok(Self::Cname),
            "SPF" => Ok(Self::Spf),
            "DMARC" => Ok(Self::Dmarc),
            _ => Err(format!("Unsupported DNS record type: {s}")),
        }
    }
}

/// Rendered DNS values per record type, iterating in declaration order.
///
/// Every [`DnsRecordType`] is present in a gathered set; a type that returned
/// nothing maps to an empty list.
pub type DnsRecordSet = BTreeMap<DnsRecordType, Vec<String>>;

/// Parsed WHOIS registration data for a domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisSummary {
    /// The queried domain name.
    pub domain: String,
    /// Domain registrar (e.g. "MarkMonitor Inc.").
    pub registrar: Option<String>,
    /// Registration creation date.
    pub creation_date: Option<String>,
    /// Last updated date.
    pub updated_date: Option<String>,
    /// Registration expiration date.
    pub expiration_date: Option<String>,
    /// Authoritative name servers.
    pub name_servers: Vec<String>,
    /// EPP status codes.
    pub status: Vec<String>,
    /// Raw WHOIS response text, capped at [`RAW_TEXT_CAP`] characters.
    pub raw: String,
}

impl WhoisSummary {
    /// Ordered `(field name, rendered value)` pairs of the parsed summary.
    ///
    /// This is the canonical flattening shared by the CSV exporter and the CLI
    /// table: lists are joined with `;`, a missing value renders as `-`. The
    /// raw response text is not part of the mapping.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        fn opt(value: Option<&String>) -> String {
            value.cloned().unwrap_or_else(|| "-".to_string())
        }
        fn list(values: &[String]) -> String {
            if values.is_empty() {
                "-".to_string()
            } else {
                values.join(";")
            }
        }

        vec![
            ("domain", self.domain.clone()),
            ("registrar", opt(self.registrar.as_ref())),
            ("creation_date", opt(self.creation_date.as_ref())),
            ("updated_date", opt(self.updated_date.as_ref())),
            ("expiration_date", opt(self.expiration_date.as_ref())),
            ("name_servers", list(&self.name_servers)),
            ("status", list(&self.status)),
        ]
    }
}

/// Aggregate result of one recon run.
///
/// Assembled once by [`ReconService::run`](crate::ReconService::run) and never
/// updated in place; exporters and front-ends only read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconReport {
    /// The queried domain (ASCII form).
    pub domain: String,
    /// Parsed WHOIS registration data.
    pub whois: WhoisSummary,
    /// Rendered DNS values per record type.
    pub dns: DnsRecordSet,
    /// DNS resolver used for the record queries.
    ///
    /// When a custom nameserver is provided, this is that IP address.
    /// Otherwise, a best-effort human-readable label for the system DNS
    /// configuration.
    pub nameserver: String,
    /// Query time (UTC, RFC 3339).
    #[serde(with = "crate::utils::datetime")]
    pub queried_at: DateTime<Utc>,
}

/// API 响应包装类型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// 是否成功
    pub success: bool,
    /// 响应数据
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}
