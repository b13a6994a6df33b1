/*
* 开发心理过程：
* 1. 集中存放引擎特判用的小型闭集表
* 2. 闪光锁定按物种/形态条件判断,区域起源形态用于跨世代转移规则
* 3. 形态绑定道具是公式型映射,形态0一律无道具
*/

use crate::data::species::{self, FormId, SpeciesId};
use crate::data::version::{EntityContext, GameVersion};

/// 区域(阿罗拉)起源形态,跨世代转移时形态受限
pub const ALOLAN_ORIGIN_FORMS: [SpeciesId; 15] = [
    19, 20, 27, 28, 37, 38, 50, 51, 52, 53, 74, 75, 76, 88, 89,
];

const ARCEUS_PLATE_ITEMS: [u16; 17] = [
    303, 306, 304, 305, 309, 308, 310, 313, 298, 299, 301, 300, 307, 302, 311, 312, 644,
];

/// 物种/形态组合是否被闪光锁定
pub fn is_shiny_locked(species: SpeciesId, form: FormId) -> bool {
    use species::*;
    match species {
        // 帽子皮卡丘和换装皮卡丘
        PIKACHU => !matches!(form, 0 | 8),
        // 刺刺耳皮丘
        PICHU => form == 1,
        VICTINI | KELDEO => true,
        // 精灵球花纹
        SCATTERBUG | SPEWPA | VIVILLON => form == 19,
        HOOPA | VOLCANION | COSMOG | COSMOEM => true,
        // HOME有闪光配信,但无法以合法方式生成
        MAGEARNA => true,
        KUBFU | URSHIFU | ZARUDE => true,
        GLASTRIER | SPECTRIER | CALYREX => true,
        ENAMORUS => true,
        GIMMIGHOUL => form == 1,
        WO_CHIEN | CHIEN_PAO | TING_LU | CHI_YU => true,
        KORAIDON | MIRAIDON => true,
        WALKING_WAKE | IRON_LEAVES => true,
        OKIDOGI | MUNKIDORI | FEZANDIPITI => true,
        OGERPON => true,
        GOUGING_FIRE | RAGING_BOLT | IRON_BOULDER | IRON_CROWN => true,
        TERAPAGOS => true,
        PECHARUNT => true,
        _ => false,
    }
}

/// 形态绑定的携带道具,形态0表示无需特殊道具
pub fn form_specific_item(
    version: GameVersion,
    generation: u8,
    species: SpeciesId,
    form: FormId,
) -> Option<u16> {
    if version == GameVersion::LegendsArceus {
        return None;
    }

    match species {
        species::ARCEUS => {
            // 世代4存在???形态占位,其后的形态索引前移一位
            let idx = if generation == 4 && form >= 9 { form - 1 } else { form };
            arceus_plate_item(idx)
        }
        species::SILVALLY if form != 0 => Some(form as u16 + 903),
        species::GENESECT if form != 0 => Some(form as u16 + 115),
        // 白金宝珠 / 大金刚宝玉
        species::GIRATINA if form == 1 => Some(if generation < 9 { 112 } else { 1779 }),
        species::ZACIAN if form == 1 => Some(1103), // 腐朽的剑
        species::ZAMAZENTA if form == 1 => Some(1104), // 腐朽的盾
        _ => None,
    }
}

fn arceus_plate_item(form: FormId) -> Option<u16> {
    if (1..=17).contains(&form) {
        Some(ARCEUS_PLATE_ITEMS[form as usize - 1])
    } else {
        None
    }
}

/// 目标形态在目标世代/语境中是否根本无法存在
///
/// `origin_generation`为实体的起源世代,0表示未知/不限
pub fn is_form_invalid(
    species: SpeciesId,
    form: FormId,
    generation: u8,
    context: EntityContext,
    origin_generation: u8,
) -> bool {
    use species::*;
    match species {
        // 永恒之花仅存于世代9a之后的格式
        FLOETTE if form == 5 && context < EntityContext::Gen9a => return true,
        SHAYMIN | FURFROU | HOOPA if form != 0 && generation <= 6 => return true,
        // ???属性石板形态
        ARCEUS if generation == 4 && form == 9 => return true,
        SCATTERBUG | SPEWPA if form == 19 => return true,
        _ => {}
    }
    if is_battle_only_form(species, form) {
        return true;
    }
    if form == 0 {
        return false;
    }
    // 区域形态不能从旧世代转移而来
    if species == PIKACHU || ALOLAN_ORIGIN_FORMS.contains(&species) {
        if generation >= 7 && origin_generation != 0 && origin_generation < 7 {
            return true;
        }
    }
    false
}

/// 仅在战斗中出现的形态,不可作为请求目标
pub fn is_battle_only_form(species: SpeciesId, form: FormId) -> bool {
    matches!(
        (species, form),
        (species::ZYGARDE, 4)   // 完全体
            | (778, 1) | (778, 3) // 破灭形态谜拟丘
            | (845, 1) | (845, 2) // 一口吞/大口吞
            | (875, 1)            // 融冰脸
            | (964, 1)            // 英雄形态
            | (species::TERAPAGOS, 1) | (species::TERAPAGOS, 2)
            | (species::OGERPON, 4) | (species::OGERPON, 5)
            | (species::OGERPON, 6) | (species::OGERPON, 7)
    )
}

/// 合体形态(酋雷姆/奈克洛兹玛/蕾冠王)
pub fn is_fused_form(species: SpeciesId, form: FormId) -> bool {
    matches!(
        (species, form),
        (646, 1) | (646, 2) | (800, 1) | (800, 2) | (species::CALYREX, 1) | (species::CALYREX, 2)
    )
}

/// 世代7图腾形态
pub fn is_totem_form(species: SpeciesId, form: FormId) -> bool {
    matches!(
        (species, form),
        (735, 1)
            | (738, 1)
            | (743, 1)
            | (752, 1)
            | (754, 1)
            | (758, 1)
            | (777, 1)
            | (778, 2)
            | (784, 1)
    )
}

/// 洗翠头目形态
pub fn is_lord_form(species: SpeciesId, form: FormId) -> bool {
    matches!(
        (species, form),
        (900, 1) | (549, 2) | (59, 2) | (101, 2) | (713, 2)
    )
}
