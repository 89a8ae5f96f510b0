//! Recon core library for domain-recon
//!
//! 对单个域名执行 WHOIS 查询与 DNS 记录收集,合并为一份 [`ReconReport`],
//! 并导出 CSV / JSON 文件。所有功能无状态,每次运行相互独立。

mod error;
mod services;
mod types;
mod utils;

pub mod export;

pub use error::{ReconError, ReconResult};
pub use services::{validate_domain, ReconService};
pub use types::{
    ApiResponse, DnsRecordSet, DnsRecordType, ReconReport, WhoisSummary, QUERY_RECORD_TYPES,
    RAW_TEXT_CAP,
};
