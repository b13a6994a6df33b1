/*
* 开发心理过程：
* 1. 创建引擎配置管理系统，支持TOML加载和保存
* 2. 所有重试循环的预算都从这里统一配置
* 3. 提供类型安全的配置访问接口
* 4. 支持默认值和部分覆盖
*/

use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

use crate::core::error::{EngineError, EngineResult};
use crate::encounter::EncounterKind;

/// 引擎配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub budget: BudgetConfig,
    pub resolver: ResolverConfig,
    pub team: TeamConfig,
}

/// 重试预算 - 每个生成循环都必须检查,避免退化输入导致不终止
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// 单次合成允许的总尝试次数
    pub max_attempts: u32,
    /// 单次内层搜索循环(闪光/PID)允许的迭代次数
    pub max_search_iterations: u32,
    /// 整体墙钟超时
    pub timeout: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// 遭遇模板的排序优先级,靠前的种类先被尝试
    pub priority: Vec<EncounterKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    /// 随机队伍的属性过滤,空表示不过滤
    pub type_filter: Vec<String>,
    /// 每支队伍的成员数
    pub team_size: usize,
    /// 随机抽取物种的尝试上限
    pub max_species_rolls: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            budget: BudgetConfig::default(),
            resolver: ResolverConfig::default(),
            team: TeamConfig::default(),
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            max_attempts: 64,
            max_search_iterations: 50_000,
            timeout: Duration::from_secs(20),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            priority: vec![
                EncounterKind::Egg,
                EncounterKind::StaticGift,
                EncounterKind::Trade,
                EncounterKind::WildSlot,
                EncounterKind::MysteryGift,
            ],
        }
    }
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            type_filter: Vec::new(),
            team_size: 6,
            max_species_rolls: 10_000,
        }
    }
}

impl EngineConfig {
    /// 从TOML文件加载配置
    pub fn load(path: &Path) -> EngineResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| EngineError::ConfigError(format!("read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| EngineError::ConfigError(format!("parse {}: {}", path.display(), e)))
    }

    /// 保存配置到TOML文件
    pub fn save(&self, path: &Path) -> EngineResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| EngineError::ConfigError(format!("serialize: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| EngineError::ConfigError(format!("write {}: {}", path.display(), e)))
    }
}
