/*
* 开发心理过程:
* 1. 形态绑定道具优先级高于请求里的道具,写错道具形态直接非法
* 2. 极巨化/太晶化是家族专属机制,只在对应上下文里落字段
* 3. 授招记录按携带招式回填,超级特训只补请求方不关心的满值槽位
*/

use crate::data::species::{self, MOVE_DRAGON_CHEER};
use crate::data::tables::form_specific_item;
use crate::data::version::EntityContext;
use crate::encounter::EncounterTemplate;
use crate::request::{NormalizedRequest, IV_DONT_CARE};
use crate::synth::entity::SynthesizedEntity;
use crate::utils::random::RandomSource;

/// 超级帕路奇亚等无法极巨化的物种
const DYNAMAX_BANNED: [u16; 3] = [species::ZACIAN, species::ZAMAZENTA, 890];

/// 可以切换超极巨因子的物种
const GIGANTAMAX_SPECIES: [u16; 32] = [
    3, 6, 9, 12, 25, 52, 68, 94, 99, 131, 133, 143, 569, 809, 812, 815, 818, 823, 826, 834, 839,
    841, 842, 844, 849, 851, 858, 861, 869, 879, 884, 892,
];

/// 携带道具:形态绑定道具压过请求值
pub fn apply_held_item(entity: &mut SynthesizedEntity, template: &EncounterTemplate, requested: Option<u16>) {
    entity.held_item = form_specific_item(
        entity.version,
        template.generation(),
        entity.species,
        entity.form,
    )
    .or(requested);
}

/// 超极巨因子:只在剑盾语境且物种支持时按请求切换
pub fn apply_gigantamax(entity: &mut SynthesizedEntity, request: &NormalizedRequest) {
    if entity.can_gigantamax == request.can_gigantamax {
        return;
    }
    let can_toggle =
        entity.context == EntityContext::Gen8 && GIGANTAMAX_SPECIES.contains(&entity.species);
    if can_toggle {
        entity.can_gigantamax = request.can_gigantamax;
    }
}

/// 极巨等级与太晶属性
pub fn apply_generation_gimmicks(entity: &mut SynthesizedEntity, request: &NormalizedRequest) {
    if entity.context == EntityContext::Gen8 {
        entity.dynamax_level = if DYNAMAX_BANNED.contains(&entity.species) {
            0
        } else {
            request.dynamax_level.unwrap_or(10)
        };
    }
    if matches!(entity.context, EntityContext::Gen9) {
        if let Some(tera) = &request.tera_type {
            entity.tera_type = Some(tera.clone());
        }
    }
}

/// 授招记录:世代8/9主机家族按携带招式置位
pub fn apply_record_flags(entity: &mut SynthesizedEntity) {
    if entity.format() < 8 || entity.context == EntityContext::Gen8a {
        return;
    }
    entity.record_flags = entity.moves.clone();
    // 铁头龙苹果的龙之吶喊只能来自授招记录
    if entity.species == species::HYDRAPPLE && !entity.record_flags.contains(&MOVE_DRAGON_CHEER) {
        entity.record_flags.push(MOVE_DRAGON_CHEER);
    }
    entity.record_flags.retain(|&m| m != 0);
}

/// 按请求的个体值约束填充:指定值照写,不关心的槽随机
pub fn apply_iv_criteria(
    entity: &mut SynthesizedEntity,
    requested: &[i8; 6],
    rng: &mut RandomSource,
) {
    for (slot, &want) in requested.iter().enumerate() {
        entity.ivs[slot] = if want == IV_DONT_CARE {
            rng.below(32) as u8
        } else {
            want as u8
        };
    }
}

/// 超级特训:世代7起,只补请求未钉死且当前未满的槽位
pub fn apply_hyper_training(entity: &mut SynthesizedEntity, requested: &[i8; 6]) {
    if entity.format() < 7 {
        return;
    }
    for slot in 0..6 {
        entity.hyper_train[slot] =
            entity.ivs[slot] != 31 && requested[slot] == IV_DONT_CARE && entity.ivs[slot] > 2;
    }
}
