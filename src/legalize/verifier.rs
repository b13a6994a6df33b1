/*
* 开发心理过程:
* 1. 合法性判定是外部协作者,引擎只消费布尔结论加逐项诊断
* 2. 诊断逐项带类别和文本,日志与调用方都用得上
* 3. 提供一个恒真的空实现,测试和离线流水线用
*/

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::synth::entity::SynthesizedEntity;

/// 单项检查结论
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub category: String,
    pub passed: bool,
    pub message: String,
}

/// 一次完整校验的输出
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    pub valid: bool,
    pub checks: Vec<CheckResult>,
}

impl Diagnostics {
    pub fn valid() -> Self {
        Self {
            valid: true,
            checks: Vec::new(),
        }
    }

    pub fn invalid(category: &str, message: &str) -> Self {
        Self {
            valid: false,
            checks: vec![CheckResult {
                category: category.to_string(),
                passed: false,
                message: message.to_string(),
            }],
        }
    }

    /// 失败项的拼接文本,日志用
    pub fn failure_summary(&self) -> String {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| format!("{}: {}", c.category, c.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(f, "valid")
        } else {
            write!(f, "invalid ({})", self.failure_summary())
        }
    }
}

/// 外部合法性判定器接口
pub trait Verifier {
    fn verify(&self, entity: &SynthesizedEntity) -> Diagnostics;
}

/// 恒真判定器,离线合成与测试用
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl Verifier for AlwaysValid {
    fn verify(&self, _entity: &SynthesizedEntity) -> Diagnostics {
        Diagnostics::valid()
    }
}
