/*
* 开发心理过程:
* 1. 盒子整理是逐只的再合成:已合法的不碰,非法的按自身字段重建请求
* 2. 随机队伍是拒绝采样:掷物种、查存在性与属性过滤、合成失败就换下一只
* 3. 配置优先走外部的已知良构来源,取不到就本地拼一份满级满努力的兜底请求
* 4. 个别物种把性别编码进形态,随机出来时要按形态改写请求
*/

use log::{debug, warn};
use std::collections::HashSet;

use crate::data::species::{self, FormId, SpeciesId};
use crate::data::tables::{
    is_battle_only_form, is_form_invalid, is_fused_form, is_lord_form, is_totem_form,
};
use crate::data::personal::Gender;
use crate::legalize::{LegalityEngine, LegalizationStatus};
use crate::request::NormalizedRequest;
use crate::synth::SynthesizedEntity;

/// 已知良构配置的外部来源 - 外部数据代码实现
///
/// 队伍成员优先从这里取现成请求;取不到时走本地兜底,
/// 招式仍由来源推荐
pub trait TeamSetSource {
    /// 该物种/形态的现成规范化请求
    fn known_sets(&self, species: SpeciesId, form: FormId) -> Vec<NormalizedRequest>;
    /// 兜底请求的推荐招式
    fn suggested_moves(&self, species: SpeciesId, form: FormId) -> Vec<u16>;
}

/// 兜底请求的努力值分配
const MAX_EFFORT_SPREAD: [u8; 6] = [252, 252, 0, 0, 0, 4];

/// 盒子整理:重建所有未过校验的实体,返回被替换的数量
pub fn legalize_all(engine: &mut LegalityEngine<'_>, entities: &mut [SynthesizedEntity]) -> usize {
    let mut replaced = 0;
    for slot in entities.iter_mut() {
        if engine.verify(slot).valid {
            continue;
        }
        let request = NormalizedRequest::from_entity(slot);
        let result = engine.synthesize(&request);
        match result.entity {
            Some(rebuilt) if result.status.is_success() => {
                debug!(
                    "盒子槽位重建: species={} attempts={}",
                    slot.species, result.attempts
                );
                *slot = rebuilt;
                replaced += 1;
            }
            _ => {
                warn!(
                    "盒子槽位无法重建: species={} status={:?}",
                    slot.species, result.status
                );
            }
        }
    }
    replaced
}

/// 随机队伍:掷物种直到凑满配置的队伍规模
pub fn six_random_team(
    engine: &mut LegalityEngine<'_>,
    sets: &dyn TeamSetSource,
) -> Vec<SynthesizedEntity> {
    let team_config = engine.config().team.clone();
    let trainer = engine.trainer().clone();
    let max_species = trainer
        .version
        .max_species_id()
        .min(engine.personal().max_species_id());
    let mut team: Vec<SynthesizedEntity> = Vec::with_capacity(team_config.team_size);
    if max_species == 0 {
        warn!("种族表为空,无法组队");
        return team;
    }
    let mut used: HashSet<u16> = HashSet::new();

    let mut rolls = 0;
    while team.len() < team_config.team_size && rolls < team_config.max_species_rolls {
        rolls += 1;
        let candidate = 1 + engine.synthesizer.rng().below(max_species as u32) as u16;
        if used.contains(&candidate) {
            continue;
        }
        let Some(base) = build_member_request(engine, candidate, &team_config.type_filter)
        else {
            continue;
        };

        // 优先从已知良构来源随机挑一份现成配置
        let known = sets.known_sets(base.species, base.form);
        let request = if known.is_empty() {
            // 本地兜底:满级满努力+来源推荐的招式
            match fallback_member_request(base, sets) {
                Some(request) => request,
                None => {
                    debug!("来源未给出招式,跳过: species={}", candidate);
                    continue;
                }
            }
        } else {
            let idx = engine.synthesizer.rng().below(known.len() as u32) as usize;
            known[idx].clone()
        };

        let result = engine.synthesize(&request);
        match result.entity {
            Some(member) if result.status == LegalizationStatus::Regenerated => {
                used.insert(candidate);
                team.push(member);
            }
            _ => {
                // 已知物种偶发合成失败,换下一只继续掷
                debug!(
                    "队伍成员合成失败: species={} status={:?}",
                    candidate, result.status
                );
            }
        }
    }
    if team.len() < team_config.team_size {
        warn!(
            "队伍未凑满: {}/{} (rolls={})",
            team.len(),
            team_config.team_size,
            rolls
        );
    }
    team
}

/// 兜底成员请求:满级、满努力、来源推荐的招式补满四格
fn fallback_member_request(
    mut request: NormalizedRequest,
    sets: &dyn TeamSetSource,
) -> Option<NormalizedRequest> {
    for mv in sets.suggested_moves(request.species, request.form) {
        if request.moves.len() >= 4 {
            break;
        }
        if !request.moves.contains(&mv) {
            request.moves.push(mv);
        }
    }
    if request.moves.is_empty() {
        return None;
    }
    request.level = 100;
    request.evs = MAX_EFFORT_SPREAD;
    Some(request)
}

/// 为一只随机成员构造请求,不满足过滤条件时返回None
fn build_member_request(
    engine: &mut LegalityEngine<'_>,
    candidate: u16,
    type_filter: &[String],
) -> Option<NormalizedRequest> {
    let trainer_version = engine.trainer().version;
    let context = trainer_version.context();
    let info = engine.personal().form_entry(context, candidate, 0)?.clone();
    if !info.present {
        return None;
    }

    // 随机挑形态,排除只在战斗/合体/头目语境里存在的
    let mut form = if info.form_count > 1 {
        engine.synthesizer.rng().below(info.form_count as u32) as u8
    } else {
        0
    };
    if is_battle_only_form(candidate, form)
        || is_fused_form(candidate, form)
        || is_totem_form(candidate, form)
        || is_lord_form(candidate, form)
    {
        form = 0;
    }
    let generation = trainer_version.generation();
    if is_form_invalid(candidate, form, generation, context, generation) {
        return None;
    }
    if !trainer_version.exists_in_game(candidate, form, engine.personal()) {
        return None;
    }
    if !type_filter.is_empty() && !type_filter.iter().any(|t| info.has_type(t)) {
        return None;
    }

    let mut request = NormalizedRequest::simple(candidate, form);
    // 性别编码进形态的物种
    if candidate == species::MEOWSTIC || candidate == species::INDEEDEE {
        request.gender = Some(if form == 1 { Gender::Female } else { Gender::Male });
    }
    // 圣剑士的觉悟形态必须携带神秘之剑
    if candidate == species::KELDEO && form == 1 {
        request.moves.push(species::MOVE_SECRET_SWORD);
    }
    Some(request)
}
