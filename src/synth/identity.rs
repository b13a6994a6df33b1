/*
* 开发心理过程:
* 1. 加密常数的规则按来源世代分岔:旧世代恒等于身份值,新世代独立随机
* 2. 几个物种把演化信息编码进加密常数,写入时必须满足对应的同余式
* 3. 固定身份值的遭遇不允许触碰,改了就再也过不了校验
*/

use crate::data::species::{self, SpeciesId};
use crate::encounter::{EncounterKind, EncounterTemplate, RaidKind, TemplateShiny};
use crate::synth::entity::SynthesizedEntity;
use crate::utils::random::RandomSource;

/// 织甲虫家族的演化分组:0 → 甲壳茧线,1 → 盾甲茧线
fn wurmple_evo_group(species: SpeciesId) -> Option<u32> {
    if (266..=269).contains(&species) {
        Some(((species - 266) / 2) as u32)
    } else {
        None
    }
}

/// 入口:为实体定加密常数
pub fn apply_encryption_constant(
    entity: &mut SynthesizedEntity,
    template: &EncounterTemplate,
    rng: &mut RandomSource,
    iterations: u32,
) {
    // 世代5及以前的存档格式没有独立的加密常数字段
    if entity.format() < 6 {
        return;
    }
    // 小智甲贺忍蛙与固定身份值遭遇的常数随模板而来
    if entity.species == species::GRENINJA && entity.form == 1 {
        return;
    }
    if template.has_fixed_pid {
        return;
    }

    let origin = template.generation();
    if (3..=5).contains(&origin) {
        // 过渡世代:常数恒等于身份值;桶落在 [8, 16) 时翻顶位压掉伪闪
        entity.encryption_constant = entity.pid;
        let xor = entity.shiny_xor();
        if (xor & !0x7) == 8 {
            entity.pid ^= 0x8000_0000;
        }
        return;
    }

    if let Some(group) = wurmple_evo_group(entity.species) {
        for _ in 0..iterations {
            let ec = rng.rand32();
            if (ec >> 16) % 10 / 5 == group {
                entity.encryption_constant = ec;
                return;
            }
        }
        return;
    }

    // 一家鼠三口/千针鱼二段把段数编码在常数模100的余数里
    let truncates = (entity.species == species::MAUSHOLD && entity.form == 0)
        || (entity.species == species::DUDUNSPARCE && entity.form == 1);
    if truncates && template.kind != EncounterKind::Raid(RaidKind::Tera) {
        let base = if entity.encryption_constant == 0 {
            rng.rand32()
        } else {
            entity.encryption_constant
        };
        entity.encryption_constant = base / 100 * 100;
        return;
    }

    if entity.encryption_constant != 0 {
        return;
    }
    // 个别配信礼物以零常数发放
    let keeps_zero = template.is_mystery_gift()
        && template.fixed_ec_zero
        && matches!(template.shiny, TemplateShiny::FixedValue);
    if !keeps_zero {
        entity.encryption_constant = rng.rand32();
    }
}
