// 合法性合成引擎库入口
// 开发心理：生成-校验循环为核心,外部判定器/遭遇枚举/种族表全部走trait注入
// 架构：模块化设计,数据表与算法分离,每个重试循环都带预算

// 核心模块 - 始终可用
pub mod core;
pub mod utils;

// 数据层 - 版本/种族/活动日历
pub mod data;

// 请求规范化与文本解析
pub mod request;

// 遭遇解析
pub mod encounter;

// 字段合成
pub mod synth;

// 合法化编排
pub mod legalize;

// 常用类型的平铺出口
pub use crate::core::{AttemptBudget, EngineConfig, EngineError, EngineResult};
pub use encounter::resolver::{EncounterResolver, EncounterSource, RawEncounter};
pub use encounter::{EncounterKind, EncounterTemplate, RaidKind};
pub use legalize::{
    legalize_all, six_random_team, AlwaysValid, Diagnostics, LegalityEngine, LegalizationResult,
    LegalizationStatus, TeamSetSource, Verifier,
};
pub use request::{parse_request, NormalizedRequest, ShinyRequest, SpeciesNames};
pub use synth::{FieldSynthesizer, SynthesizedEntity, TrainerContext};

/// 初始化日志,进程内只生效一次
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
