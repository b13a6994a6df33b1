/*
* 开发心理过程:
* 1. 身高/体重标量按版本家族分三条公式:主机世代的0x80/0x81对、LGPE的0xFF、纯随机
* 2. 一长串遭遇来源自带或校验尺寸,对它们写标量等于自毁
* 3. 体型标量只在世代9语境下落盘,128是保留的中位数不覆盖
*/

use crate::data::version::{EntityContext, VersionGroup};
use crate::encounter::EncounterTemplate;
use crate::synth::entity::SynthesizedEntity;
use crate::utils::random::RandomSource;

/// 主机世代标量:两半各自取模后求和,分布向中间堆
fn console_scalar(value: u32) -> u8 {
    (((value >> 16) % 0x80 + (value & 0xFFFF) % 0x81) & 0xFF) as u8
}

/// LGPE标量:身份值两半各自对0xFF取模
fn go_park_height(pid: u32) -> u8 {
    ((pid >> 16) % 0xFF) as u8
}

fn go_park_weight(pid: u32) -> u8 {
    ((pid & 0xFFFF) % 0xFF) as u8
}

/// 世代9体型:身高参与两半的乘积再取模
fn scale_scalar(pid: u32, height: u8) -> u8 {
    let h = height as u32;
    ((((pid >> 16) * h) % 0x80 + ((pid & 0xFFFF) * h) % 0x81) & 0xFF) as u8
}

/// 入口:为实体定身高/体重/体型标量
pub fn apply_size_scalars(
    entity: &mut SynthesizedEntity,
    template: &EncounterTemplate,
    randomize: bool,
    rng: &mut RandomSource,
) {
    // 旧世代来源转入新格式时尺寸由转移层决定
    if template.generation() < 8
        && entity.context != EntityContext::Gen7b
        && entity.format() >= 8
    {
        return;
    }
    // 洗翠的尺寸与出生序列强相关,不碰
    if entity.context == EntityContext::Gen9a {
        return;
    }
    if template.skips_size_assignment() || template.home_gift {
        return;
    }
    if let Some((height, weight)) = template.gift_scalars {
        entity.height_scalar = height;
        entity.weight_scalar = weight;
        return;
    }
    if template.has_native_size_values {
        return;
    }

    if randomize {
        entity.height_scalar = rng.below(0xFF) as u8;
        entity.weight_scalar = rng.below(0xFF) as u8;
    } else {
        match entity.version.island() {
            VersionGroup::Swsh | VersionGroup::Bdsp | VersionGroup::Sv => {
                entity.height_scalar = console_scalar(entity.pid);
                entity.weight_scalar = console_scalar(entity.encryption_constant);
            }
            VersionGroup::Gg => {
                entity.height_scalar = go_park_height(entity.pid);
                entity.weight_scalar = go_park_weight(entity.pid);
            }
            _ => {
                entity.height_scalar = rng.below(0xFF) as u8;
                entity.weight_scalar = rng.below(0xFF) as u8;
            }
        }
    }

    if matches!(entity.context, EntityContext::Gen9)
        && !matches!(template.kind, crate::encounter::EncounterKind::Fixed(_))
    {
        let scale = scale_scalar(entity.pid, entity.height_scalar);
        if entity.scale != Some(128) {
            entity.scale = Some(scale);
        }
    }
}
