/*
* 开发心理过程：
* 1. 遭遇模板是封闭和类型,每种获取途径一个变体,匹配保持穷尽
* 2. 模板一旦解析完成即不可变,合成器只读引用
* 3. 固定值标志(闪光锁/固定PID/固定尺寸)决定合成器的短路路径
*/

use serde::{Deserialize, Serialize};

use crate::data::events::DateRange;
use crate::data::personal::Gender;
use crate::data::species::{FormId, SpeciesId};
use crate::data::version::{EntityContext, GameVersion};

pub mod resolver;

pub use resolver::{EncounterResolver, EncounterSource, RawEncounter};

/// 世代8团战的子类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaidKind {
    Standard,
    Crystal,
    Distribution,
    /// 极巨巢穴 - 闪光时身份异或必须恰为1
    MaxLair,
    /// 世代9太晶团战
    Tera,
}

/// 遭遇种类
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterKind {
    Egg,
    StaticGift,
    Trade,
    WildSlot,
    MysteryGift,
    Raid(RaidKind),
    /// 无法归类的遭遇,保留校验器自己的标签
    Fixed(String),
}

/// 模板自带的闪光约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemplateShiny {
    #[default]
    Random,
    Never,
    /// 身份值由模板固定给出,不得改写
    FixedValue,
}

/// 一种合法获取途径的完整描述,解析后不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterTemplate {
    pub kind: EncounterKind,
    pub species: SpeciesId,
    pub form: FormId,
    pub version: GameVersion,
    pub level_min: u8,
    pub level_max: u8,
    pub shiny: TemplateShiny,
    pub has_fixed_pid: bool,
    pub has_fixed_size: bool,
    /// LGPE式模板,尺寸为原生字段直接重算
    pub has_native_size_values: bool,
    pub home_gift: bool,
    /// 礼物载荷直接给出的身高/体重标量
    pub gift_scalars: Option<(u8, u8)>,
    pub fixed_ec_zero: bool,
    pub window: Option<DateRange>,
    pub required_gender: Option<Gender>,
    pub fixed_ot_friendship: Option<u8>,
    pub location: u16,
    /// 解析期标注:该物种/形态在目标版本的最低可获取等级
    pub min_obtainable_level: u8,
}

impl EncounterTemplate {
    pub fn context(&self) -> EntityContext {
        self.version.context()
    }

    pub fn generation(&self) -> u8 {
        self.version.generation()
    }

    pub fn is_egg(&self) -> bool {
        self.kind == EncounterKind::Egg
    }

    pub fn is_raid(&self) -> bool {
        matches!(self.kind, EncounterKind::Raid(_))
    }

    pub fn is_mystery_gift(&self) -> bool {
        self.kind == EncounterKind::MysteryGift
    }

    /// 原始训练家是否可能亲自持有过该实体
    pub fn can_ot_handle(&self) -> bool {
        if self.generation() < 3 {
            return false;
        }
        !matches!(self.kind, EncounterKind::Trade | EncounterKind::MysteryGift)
    }

    /// 不可交易遭遇:LGPE御三家(地点28)
    pub fn is_untradeable(&self) -> bool {
        self.kind == EncounterKind::StaticGift
            && self.context() == EntityContext::Gen7b
            && self.location == 28
    }

    /// 尺寸标量是否被模板外部固定
    pub fn skips_size_assignment(&self) -> bool {
        self.has_fixed_size
            || matches!(self.kind, EncounterKind::Trade)
            || matches!(
                self.kind,
                EncounterKind::Raid(RaidKind::Standard)
                    | EncounterKind::Raid(RaidKind::Crystal)
                    | EncounterKind::Raid(RaidKind::Distribution)
            )
    }
}

/// 测试用最小模板,其余测试模块共用
#[cfg(test)]
pub(crate) fn sample_template(kind: EncounterKind, version: GameVersion) -> EncounterTemplate {
    EncounterTemplate {
        kind,
        species: 25,
        form: 0,
        version,
        level_min: 5,
        level_max: 60,
        shiny: TemplateShiny::Random,
        has_fixed_pid: false,
        has_fixed_size: false,
        has_native_size_values: false,
        home_gift: false,
        gift_scalars: None,
        fixed_ec_zero: false,
        window: None,
        required_gender: None,
        fixed_ot_friendship: None,
        location: 0,
        min_obtainable_level: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_ot_handle() {
        let wild = sample_template(EncounterKind::WildSlot, GameVersion::Sword);
        assert!(wild.can_ot_handle());

        let trade = sample_template(EncounterKind::Trade, GameVersion::Sword);
        assert!(!trade.can_ot_handle());

        let gen2 = sample_template(EncounterKind::WildSlot, GameVersion::Crystal);
        assert!(!gen2.can_ot_handle());
    }

    #[test]
    fn test_untradeable_lgpe_starter() {
        let mut starter =
            sample_template(EncounterKind::StaticGift, GameVersion::LetsGoPikachu);
        starter.location = 28;
        assert!(starter.is_untradeable());

        starter.location = 5;
        assert!(!starter.is_untradeable());
    }

    #[test]
    fn test_raid_skips_size() {
        let raid = sample_template(
            EncounterKind::Raid(RaidKind::Standard),
            GameVersion::Sword,
        );
        assert!(raid.skips_size_assignment());

        let lair = sample_template(EncounterKind::Raid(RaidKind::MaxLair), GameVersion::Sword);
        assert!(!lair.skips_size_assignment());
    }
}
