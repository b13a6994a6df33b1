// 核心模块 - 引擎基础系统
// 开发心理：建立稳固的基础架构，为合成逻辑提供错误处理和配置管理

pub mod config;
pub mod error;

pub use config::{BudgetConfig, EngineConfig};
pub use error::{EngineError, EngineResult};

use std::time::Instant;

/// 尝试预算 - 在每个重试循环里传递并检查
#[derive(Debug, Clone)]
pub struct AttemptBudget {
    started: Instant,
    attempts_left: u32,
    config: BudgetConfig,
}

impl AttemptBudget {
    pub fn new(config: &BudgetConfig) -> Self {
        Self {
            started: Instant::now(),
            attempts_left: config.max_attempts,
            config: config.clone(),
        }
    }

    /// 消耗一次尝试,返回是否还有余量
    pub fn consume(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.attempts_left -= 1;
        true
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts_left == 0 || self.started.elapsed() >= self.config.timeout
    }

    /// 内层搜索循环的迭代上限
    pub fn search_iterations(&self) -> u32 {
        self.config.max_search_iterations
    }

    /// 墙钟检查,供长时间内层循环使用
    pub fn timed_out(&self) -> bool {
        self.started.elapsed() >= self.config.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_budget_consumes_attempts() {
        let config = BudgetConfig {
            max_attempts: 2,
            max_search_iterations: 10,
            timeout: Duration::from_secs(60),
        };
        let mut budget = AttemptBudget::new(&config);
        assert!(budget.consume());
        assert!(budget.consume());
        assert!(!budget.consume());
        assert!(budget.is_exhausted());
    }

    #[test]
    fn test_budget_timeout() {
        let config = BudgetConfig {
            max_attempts: 100,
            max_search_iterations: 10,
            timeout: Duration::from_secs(0),
        };
        let mut budget = AttemptBudget::new(&config);
        assert!(budget.timed_out());
        assert!(!budget.consume());
    }
}
