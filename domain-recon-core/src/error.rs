//! 统一错误类型定义

use serde::Serialize;
use thiserror::Error;

/// Recon 错误类型
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ReconError {
    /// 验证错误 (rejected before any network I/O)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// WHOIS / DNS 查询失败
    #[error("Lookup error: {0}")]
    LookupError(String),

    /// 导出文件写入失败
    #[error("Export error: {0}")]
    ExportError(String),
}

impl ReconError {
    /// Whether this is expected behaviour (bad user input), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}

/// Recon Result 类型别名
pub type ReconResult<T> = std::result::Result<T, ReconError>;
