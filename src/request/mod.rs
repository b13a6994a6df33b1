/*
* 开发心理过程：
* 1. 规范化请求是合成器的唯一输入形式
* 2. 指令/过滤行作为旁路通道保留原文,可在重试时逐级丢弃
* 3. 从已接受实体反向构造请求,支持批量再合成与往返校验
*/

use serde::{Deserialize, Serialize};

use crate::data::personal::Gender;
use crate::data::species::{FormId, SpeciesId};
use crate::synth::entity::SynthesizedEntity;

pub mod parser;

pub use parser::{parse_request, SpeciesNames};

/// 请求的闪光类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShinyRequest {
    Never,
    #[default]
    Random,
    AlwaysStar,
    AlwaysSquare,
    Always,
    /// 模板给定固定身份值,请求方不得改写
    FixedValue,
}

impl ShinyRequest {
    pub fn wants_shiny(self) -> bool {
        matches!(self, Self::AlwaysStar | Self::AlwaysSquare | Self::Always)
    }
}

/// IV的"不关心"哨兵值
pub const IV_DONT_CARE: i8 = -1;

/// 每个合成尝试的字段准则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    /// 每项能力的请求IV,-1表示不关心
    pub ivs: [i8; 6],
    pub shiny: ShinyRequest,
    /// 请求的特性槽(0/1/2),None表示任意
    pub ability_slot: Option<u8>,
    pub nature: Option<u8>,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            ivs: [IV_DONT_CARE; 6],
            shiny: ShinyRequest::Random,
            ability_slot: None,
            nature: None,
        }
    }
}

/// 指令行 - `.Prop=Value` 的字段覆盖
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub property: String,
    pub value: String,
}

/// 过滤行 - `=Prop=Value`(要求)或 `!Prop=Value`(排除)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub property: String,
    pub value: String,
    pub required: bool,
}

/// 请求文本中的训练家覆盖旁路
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerOverride {
    pub ot_name: Option<String>,
    pub tid: Option<u32>,
    pub sid: Option<u32>,
    pub gender: Option<Gender>,
    pub language: Option<u8>,
}

impl TrainerOverride {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// 规范化请求 - 合成循环的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRequest {
    pub species: SpeciesId,
    pub form: FormId,
    pub nickname: Option<String>,
    pub gender: Option<Gender>,
    pub level: u8,
    pub held_item: Option<u16>,
    pub moves: Vec<u16>,
    pub evs: [u8; 6],
    pub criteria: Criteria,
    pub can_gigantamax: bool,
    pub tera_type: Option<String>,
    pub dynamax_level: Option<u8>,
    pub instructions: Vec<Instruction>,
    pub filters: Vec<Filter>,
    pub trainer: TrainerOverride,
}

impl NormalizedRequest {
    pub fn simple(species: SpeciesId, form: FormId) -> Self {
        Self {
            species,
            form,
            nickname: None,
            gender: None,
            level: 50,
            held_item: None,
            moves: Vec::new(),
            evs: [0; 6],
            criteria: Criteria::default(),
            can_gigantamax: false,
            tera_type: None,
            dynamax_level: None,
            instructions: Vec::new(),
            filters: Vec::new(),
            trainer: TrainerOverride::default(),
        }
    }

    /// 非必要指令/过滤行是否还有可丢弃的余地
    pub fn has_extras(&self) -> bool {
        !self.instructions.is_empty() || !self.filters.is_empty()
    }

    /// 去掉指令/过滤旁路的宽松版本,重试时使用
    pub fn relaxed(&self) -> Self {
        let mut copy = self.clone();
        copy.instructions.clear();
        copy.filters.clear();
        copy
    }

    /// 最小化版本,只保留物种/形态/等级,兜底重试路径
    pub fn bare(&self) -> Self {
        let mut bare = Self::simple(self.species, self.form);
        bare.level = self.level;
        bare.criteria.shiny = self.criteria.shiny;
        bare
    }

    /// 从已接受的实体反向构造请求,批量再合成时复用其现有数据
    pub fn from_entity(entity: &SynthesizedEntity) -> Self {
        let mut request = Self::simple(entity.species, entity.form);
        request.level = entity.level;
        request.held_item = entity.held_item;
        request.moves = entity.moves.clone();
        request.evs = entity.evs;
        request.gender = Some(entity.gender);
        request.can_gigantamax = entity.can_gigantamax;
        request.criteria.shiny = if entity.is_shiny() {
            ShinyRequest::Always
        } else {
            ShinyRequest::Never
        };
        for (slot, iv) in entity.ivs.iter().enumerate() {
            request.criteria.ivs[slot] = *iv as i8;
        }
        request
    }
}
