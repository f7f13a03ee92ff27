//! Quota gate and usage recording handlers.

mod evaluate_quota;
mod record_usage;

pub use evaluate_quota::{
    EvaluateQuotaHandler, EvaluateQuotaQuery, QuotaDecision, QuotaError, LIMIT_RETRY_HINT,
};
pub use record_usage::{RecordUsageCommand, RecordUsageHandler};
