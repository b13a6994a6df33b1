/*
* 开发心理过程:
* 1. 闪光是按世代分派的状态机:锁闪短路 → 团战/HOME/神秘礼物特判 → 世代通道
* 2. 所有重掷循环必须有迭代上限,绝不允许无界搜索
* 3. 世代5的奇偶恒等式与SID奇偶保持是硬约束,违反会被外部校验器拒绝
*/

use crate::data::personal::{Gender, RATIO_MAGIC_GENDERLESS};
use crate::data::tables::is_shiny_locked;
use crate::data::version::GameVersion;
use crate::encounter::{EncounterKind, EncounterTemplate, RaidKind, TemplateShiny};
use crate::request::ShinyRequest;
use crate::synth::entity::{shiny_pid, SynthesizedEntity};
use crate::utils::random::RandomSource;

/// GameCube系LCG:种子推进一步
fn gc_lcg_next(seed: u32) -> u32 {
    seed.wrapping_mul(0x343FD).wrapping_add(0x269EC3)
}

/// 按请求类别检验当前异或桶
fn matches_class(entity: &SynthesizedEntity, request: ShinyRequest) -> bool {
    let xor = entity.shiny_xor();
    match request {
        ShinyRequest::Never => !entity.is_shiny(),
        ShinyRequest::AlwaysSquare => xor == 0,
        ShinyRequest::AlwaysStar => xor > 0 && xor < entity.shiny_threshold(),
        ShinyRequest::Always | ShinyRequest::Random | ShinyRequest::FixedValue => entity.is_shiny(),
    }
}

/// 随机掷一个闪光身份值,异或桶均匀落在 [0, threshold)
fn roll_shiny(entity: &mut SynthesizedEntity, rng: &mut RandomSource) {
    let target = rng.below(entity.shiny_threshold() as u32) as u16;
    entity.pid = shiny_pid(entity.tid16, entity.sid16, rng.rand32(), target);
}

/// 解SID使异或桶落在 [0, 8):星闪且对老世代同样成立
fn set_shiny_sid(entity: &mut SynthesizedEntity, rng: &mut RandomSource) {
    let target = rng.below(8) as u16;
    entity.sid16 = entity.tid16
        ^ (entity.pid >> 16) as u16
        ^ (entity.pid & 0xFFFF) as u16
        ^ target;
}

/// 入口:按遭遇与请求调整闪光状态
pub fn apply_shininess(
    entity: &mut SynthesizedEntity,
    template: &EncounterTemplate,
    request: ShinyRequest,
    gender_ratio: u8,
    rng: &mut RandomSource,
    iterations: u32,
) {
    // 锁闪物种无条件短路,优先级高于任何请求
    if is_shiny_locked(entity.species, entity.form) {
        return;
    }
    // 未指定与固定值都保持掷出的原样
    if matches!(request, ShinyRequest::Random | ShinyRequest::FixedValue) {
        return;
    }
    let want = request.wants_shiny();
    if entity.is_shiny() == want
        && !matches!(request, ShinyRequest::AlwaysSquare | ShinyRequest::AlwaysStar)
    {
        return;
    }
    if !want {
        entity.set_unshiny(rng, iterations);
        return;
    }

    if let EncounterKind::Raid(kind) = &template.kind {
        set_raid_shiny(entity, *kind, request, rng, iterations);
        return;
    }
    if template.home_gift {
        set_home_gift_shiny(entity, rng);
        return;
    }
    if template.is_mystery_gift() {
        set_gift_shiny(entity, template, rng, iterations);
        return;
    }

    match template.generation() {
        g if g > 5 => set_modern_shiny(entity, template, request, rng, iterations),
        5 => set_gen5_shiny(entity, request, gender_ratio, rng, iterations),
        3 | 4 => set_classic_shiny(entity, template, request, rng, iterations),
        _ => set_dv_shiny(entity),
    }
}

/// 世代6+:固定闪光模板不动,否则重掷到请求的桶
fn set_modern_shiny(
    entity: &mut SynthesizedEntity,
    template: &EncounterTemplate,
    request: ShinyRequest,
    rng: &mut RandomSource,
    iterations: u32,
) {
    if !matches!(template.shiny, TemplateShiny::Random) {
        return;
    }
    for _ in 0..iterations {
        roll_shiny(entity, rng);
        if matches_class(entity, request) {
            return;
        }
    }
}

/// 世代8团战:MaxLair要求异或恰为1,其余按星/方收敛到 [0, 2)
fn set_raid_shiny(
    entity: &mut SynthesizedEntity,
    kind: RaidKind,
    request: ShinyRequest,
    rng: &mut RandomSource,
    iterations: u32,
) {
    for _ in 0..iterations {
        roll_shiny(entity, rng);
        if entity.format() <= 7 {
            return;
        }
        let xor = entity.shiny_xor();
        if kind == RaidKind::MaxLair {
            if xor == 1 {
                return;
            }
            if entity.is_shiny() {
                entity.pid = shiny_pid(entity.tid16, entity.sid16, entity.pid, 1);
                return;
            }
            continue;
        }
        let ok = match request {
            ShinyRequest::AlwaysSquare => xor == 0,
            ShinyRequest::AlwaysStar => xor == 1,
            _ => xor < 2,
        };
        if ok {
            return;
        }
    }
}

/// HOME礼物:TID由身份值两半导出,SID随机小于8,必为星闪
fn set_home_gift_shiny(entity: &mut SynthesizedEntity, rng: &mut RandomSource) {
    entity.tid16 = (entity.pid >> 16) as u16 ^ (entity.pid & 0xFFFF) as u16;
    entity.sid16 = rng.below(8) as u16;
}

/// 神秘礼物:蛋走SID通道;成体直接掷闪,世代6+要避开第3位桶
fn set_gift_shiny(
    entity: &mut SynthesizedEntity,
    template: &EncounterTemplate,
    rng: &mut RandomSource,
    iterations: u32,
) {
    if template.is_egg() {
        set_shiny_sid(entity, rng);
        return;
    }
    roll_shiny(entity, rng);
    if template.generation() < 6 {
        return;
    }
    // 桶在 [8, 16) 会被世代6+的礼物校验拒绝
    let bit3_set = |e: &SynthesizedEntity| (e.shiny_xor() & !0x7) == 8;
    let mut remaining = iterations;
    while bit3_set(entity) && remaining > 0 {
        roll_shiny(entity, rng);
        remaining -= 1;
    }
}

/// 世代5:重造身份值并解SID,同时保持SID奇偶与奇偶恒等式
fn set_gen5_shiny(
    entity: &mut SynthesizedEntity,
    request: ShinyRequest,
    gender_ratio: u8,
    rng: &mut RandomSource,
    iterations: u32,
) {
    let sid_parity = entity.sid16 & 1;
    for _ in 0..iterations {
        entity.pid = gen5_pid(entity.gender, gender_ratio, rng);
        set_shiny_sid(entity, rng);
        if !matches_class(entity, request) {
            continue;
        }
        if entity.sid16 & 1 != sid_parity {
            continue;
        }
        let parity = (entity.pid & 1)
            ^ (entity.pid >> 31)
            ^ (entity.tid16 & 1) as u32
            ^ (entity.sid16 & 1) as u32;
        if parity == 0 {
            entity.encryption_constant = entity.pid;
            return;
        }
    }
}

/// 世代5身份值:低字节落在性别比例允许的区间
fn gen5_pid(gender: Gender, ratio: u8, rng: &mut RandomSource) -> u32 {
    let pid = rng.rand32();
    if ratio == RATIO_MAGIC_GENDERLESS || ratio == 0 || ratio == crate::data::personal::RATIO_MAGIC_FEMALE {
        return pid;
    }
    let low = match gender {
        Gender::Female => rng.below(ratio as u32),
        _ => ratio as u32 + rng.below(256 - ratio as u32),
    };
    (pid & 0xFFFF_FF00) | low
}

/// 世代3/4:GameCube来源先走LCG重造身份值,然后直接解SID
fn set_classic_shiny(
    entity: &mut SynthesizedEntity,
    template: &EncounterTemplate,
    request: ShinyRequest,
    rng: &mut RandomSource,
    iterations: u32,
) {
    if template.version == GameVersion::ColosseumXD {
        set_gc_starter_pid(entity, request, iterations);
        return;
    }
    set_shiny_sid(entity, rng);
    if matches!(request, ShinyRequest::AlwaysSquare) {
        entity.sid16 = entity.tid16 ^ (entity.pid >> 16) as u16 ^ (entity.pid & 0xFFFF) as u16;
    }
}

/// GameCube御三家:种子由个体值打包,LCG前进两步取两个高半拼身份值
fn set_gc_starter_pid(entity: &mut SynthesizedEntity, request: ShinyRequest, iterations: u32) {
    let ivs = &entity.ivs;
    let mut seed = ((ivs[0] as u32 & 0x1F)
        | ((ivs[1] as u32 & 0x1F) << 5)
        | ((ivs[2] as u32 & 0x1F) << 10))
        << 16
        | ((ivs[5] as u32 & 0x1F)
            | ((ivs[3] as u32 & 0x1F) << 5)
            | ((ivs[4] as u32 & 0x1F) << 10));
    for _ in 0..iterations {
        let r1 = gc_lcg_next(seed);
        let r2 = gc_lcg_next(r1);
        let pid = ((r1 >> 16) << 16) | (r2 >> 16);
        entity.pid = pid;
        if matches_class(entity, request) {
            return;
        }
        seed = gc_lcg_next(r2);
    }
}

/// 世代1/2:闪光由DV模式决定,直接写个体值
fn set_dv_shiny(entity: &mut SynthesizedEntity) {
    // HP由四个DV的末位拼出:仅攻击末位为1 → 8
    entity.ivs = [8, 15, 10, 10, 10, 10];
}
