// 错误处理系统
// 开发心理：合法性失败走状态值通道，错误类型只保留数据/编程故障
// 批量操作因此可以跳过失败项而不中断

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// 缺失的静态表条目,属于数据错误而非合法性失败
    #[error("no personal table entry for species {species} form {form} in {context}")]
    MissingTableEntry {
        species: u16,
        form: u8,
        context: String,
    },
    #[error("invalid request text: {0}")]
    InvalidRequest(String),
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("event calendar data error: {0}")]
    CalendarError(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entry_message() {
        let err = EngineError::MissingTableEntry {
            species: 25,
            form: 0,
            context: "Gen9".to_string(),
        };
        assert!(err.to_string().contains("species 25"));
    }
}
