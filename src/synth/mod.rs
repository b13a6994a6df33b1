/*
* 开发心理过程:
* 1. 合成器把请求+遭遇模板+训练家上下文变成一只候选实体,纯函数式的一次尝试
* 2. 字段写入顺序是硬约束:身份先于闪光,闪光先于加密常数,常数先于尺寸
* 3. 每次尝试用同一个可播种随机源,离线复现一只实体只需要种子
*/

use log::{debug, trace};

use crate::core::error::{EngineError, EngineResult};
use crate::data::events::EventCalendar;
use crate::data::personal::{Gender, PersonalTable};
use crate::encounter::{EncounterKind, EncounterTemplate, RaidKind};
use crate::request::NormalizedRequest;
use crate::utils::random::RandomSource;

pub mod dates;
pub mod entity;
pub mod gimmick;
pub mod identity;
pub mod shiny;
pub mod size;
pub mod trainer;

pub use entity::{GeoRegion, SynthesizedEntity, TradeMemory, TrainerContext};

/// 字段合成器 - 一次候选实体的装配流水线
pub struct FieldSynthesizer {
    rng: RandomSource,
    iterations: u32,
    /// 尺寸走均匀随机而不是身份值推导
    pub randomize_sizes: bool,
}

impl FieldSynthesizer {
    pub fn new(iterations: u32) -> Self {
        Self {
            rng: RandomSource::new(),
            iterations,
            randomize_sizes: false,
        }
    }

    pub fn with_seed(seed: u64, iterations: u32) -> Self {
        Self {
            rng: RandomSource::with_seed(seed),
            iterations,
            randomize_sizes: false,
        }
    }

    pub fn rng(&mut self) -> &mut RandomSource {
        &mut self.rng
    }

    /// 装配一只候选实体,字段顺序见文件头
    pub fn synthesize(
        &mut self,
        request: &NormalizedRequest,
        trainer: &TrainerContext,
        template: &EncounterTemplate,
        personal: &dyn PersonalTable,
        calendar: &EventCalendar,
    ) -> EngineResult<SynthesizedEntity> {
        let context = trainer.context();
        let info = personal
            .form_entry(context, request.species, request.form)
            .ok_or_else(|| EngineError::MissingTableEntry {
                species: request.species,
                form: request.form,
                context: context.to_string(),
            })?
            .clone();

        let mut entity =
            SynthesizedEntity::blank(request.species, request.form, template.version, context);
        entity.level = request.level.max(template.min_obtainable_level);
        entity.moves = request.moves.clone();
        entity.evs = request.evs;
        entity.met_location = template.location;
        entity.nature = request
            .criteria
            .nature
            .unwrap_or_else(|| self.rng.below(25) as u8);
        entity.ability_slot = request.criteria.ability_slot.unwrap_or(0);
        entity.gender = self.resolve_gender(request, template, calendar, &info);
        entity.pid = self.rng.rand32();
        // 七星团战的产物必然带着最强证
        entity.ribbon_mark_mightiest = template.kind == EncounterKind::Raid(RaidKind::Tera)
            && calendar.windows_for(entity.species, entity.form).is_some();

        trainer::apply_trainer_identity(&mut entity, trainer, template);
        gimmick::apply_iv_criteria(&mut entity, &request.criteria.ivs, &mut self.rng);
        shiny::apply_shininess(
            &mut entity,
            template,
            request.criteria.shiny,
            info.gender_ratio,
            &mut self.rng,
            self.iterations,
        );
        identity::apply_encryption_constant(&mut entity, template, &mut self.rng, self.iterations);
        size::apply_size_scalars(&mut entity, template, self.randomize_sizes, &mut self.rng);
        trainer::apply_friendship(&mut entity, template, personal)?;
        trainer::apply_handler_and_memory(&mut entity, trainer, template);
        trainer::apply_handler_language(&mut entity, trainer.language);
        gimmick::apply_held_item(&mut entity, template, request.held_item);
        gimmick::apply_gigantamax(&mut entity, request);
        gimmick::apply_generation_gimmicks(&mut entity, request);
        gimmick::apply_record_flags(&mut entity);
        gimmick::apply_hyper_training(&mut entity, &request.criteria.ivs);
        dates::apply_distribution_window(&mut entity, template);
        dates::apply_unrivaled_date(&mut entity, calendar, &mut self.rng);

        trace!(
            "候选装配完成: species={} pid={:08X} ec={:08X} shiny={}",
            entity.species,
            entity.pid,
            entity.encryption_constant,
            entity.is_shiny()
        );
        Ok(entity)
    }

    /// 性别优先级:模板锁定 > 活动日历锁定 > 请求 > 种族比例掷点
    fn resolve_gender(
        &mut self,
        request: &NormalizedRequest,
        template: &EncounterTemplate,
        calendar: &EventCalendar,
        info: &crate::data::personal::PersonalInfo,
    ) -> Gender {
        if let Some(locked) = template.required_gender {
            return locked;
        }
        if template.kind == EncounterKind::Raid(RaidKind::Tera) {
            if let Some(locked) = calendar.mighty_raid_gender(request.species, request.form) {
                debug!("活动性别锁生效: species={}", request.species);
                return locked;
            }
        }
        if let Some(wanted) = request.gender {
            if info.is_gender_valid(wanted) {
                return wanted;
            }
        }
        info.sane_gender(self.rng.below(253) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::personal::{InMemoryPersonalTable, PersonalInfo, RATIO_MAGIC_FEMALE};
    use crate::data::species;
    use crate::data::version::GameVersion;
    use crate::encounter::sample_template;
    use crate::request::ShinyRequest;

    fn table() -> InMemoryPersonalTable {
        let mut t = InMemoryPersonalTable::default();
        t.insert_all_contexts(
            species::PIKACHU,
            0,
            PersonalInfo {
                base_friendship: 50,
                gender_ratio: 127,
                type1: "Electric".to_string(),
                type2: String::new(),
                form_count: 1,
                present: true,
            },
        );
        t
    }

    fn trainer() -> TrainerContext {
        TrainerContext {
            ot_name: "Juliana".to_string(),
            tid16: 4921,
            sid16: 30321,
            gender: Gender::Female,
            language: 2,
            version: GameVersion::Scarlet,
            region: None,
        }
    }

    #[test]
    fn test_full_assembly_is_deterministic() {
        let personal = table();
        let calendar = EventCalendar::bundled().unwrap();
        let request = NormalizedRequest::simple(species::PIKACHU, 0);
        let template = sample_template(EncounterKind::WildSlot, GameVersion::Scarlet);

        let mut a = FieldSynthesizer::with_seed(77, 4096);
        let mut b = FieldSynthesizer::with_seed(77, 4096);
        let ea = a
            .synthesize(&request, &trainer(), &template, &personal, &calendar)
            .unwrap();
        let eb = b
            .synthesize(&request, &trainer(), &template, &personal, &calendar)
            .unwrap();
        assert_eq!(ea.pid, eb.pid);
        assert_eq!(ea.encryption_constant, eb.encryption_constant);
        assert_eq!(ea.ivs, eb.ivs);
    }

    #[test]
    fn test_shiny_request_honored() {
        let personal = table();
        let calendar = EventCalendar::bundled().unwrap();
        let mut request = NormalizedRequest::simple(species::PIKACHU, 0);
        request.criteria.shiny = ShinyRequest::Always;
        let template = sample_template(EncounterKind::WildSlot, GameVersion::Scarlet);

        let mut synth = FieldSynthesizer::with_seed(3, 4096);
        let e = synth
            .synthesize(&request, &trainer(), &template, &personal, &calendar)
            .unwrap();
        assert!(e.is_shiny());
        assert_ne!(e.encryption_constant, 0);
    }

    #[test]
    fn test_level_floor_from_template() {
        let personal = table();
        let calendar = EventCalendar::bundled().unwrap();
        let mut request = NormalizedRequest::simple(species::PIKACHU, 0);
        request.level = 1;
        let mut template = sample_template(EncounterKind::WildSlot, GameVersion::Scarlet);
        template.min_obtainable_level = 30;

        let mut synth = FieldSynthesizer::with_seed(3, 256);
        let e = synth
            .synthesize(&request, &trainer(), &template, &personal, &calendar)
            .unwrap();
        assert_eq!(e.level, 30);
    }

    #[test]
    fn test_required_gender_wins() {
        let personal = table();
        let calendar = EventCalendar::bundled().unwrap();
        let mut request = NormalizedRequest::simple(species::PIKACHU, 0);
        request.gender = Some(Gender::Male);
        let mut template = sample_template(EncounterKind::StaticGift, GameVersion::Scarlet);
        template.required_gender = Some(Gender::Female);

        let mut synth = FieldSynthesizer::with_seed(3, 256);
        let e = synth
            .synthesize(&request, &trainer(), &template, &personal, &calendar)
            .unwrap();
        assert_eq!(e.gender, Gender::Female);
    }

    #[test]
    fn test_invalid_requested_gender_rerolled() {
        let mut personal = InMemoryPersonalTable::default();
        personal.insert_all_contexts(
            species::PIKACHU,
            0,
            PersonalInfo {
                base_friendship: 50,
                gender_ratio: RATIO_MAGIC_FEMALE,
                type1: "Electric".to_string(),
                type2: String::new(),
                form_count: 1,
                present: true,
            },
        );
        let calendar = EventCalendar::bundled().unwrap();
        let mut request = NormalizedRequest::simple(species::PIKACHU, 0);
        request.gender = Some(Gender::Male);
        let template = sample_template(EncounterKind::WildSlot, GameVersion::Scarlet);

        let mut synth = FieldSynthesizer::with_seed(3, 256);
        let e = synth
            .synthesize(&request, &trainer(), &template, &personal, &calendar)
            .unwrap();
        assert_eq!(e.gender, Gender::Female);
    }

    #[test]
    fn test_missing_personal_entry_errors() {
        let personal = InMemoryPersonalTable::default();
        let calendar = EventCalendar::bundled().unwrap();
        let request = NormalizedRequest::simple(species::PIKACHU, 0);
        let template = sample_template(EncounterKind::WildSlot, GameVersion::Scarlet);

        let mut synth = FieldSynthesizer::with_seed(3, 256);
        let result = synth.synthesize(&request, &trainer(), &template, &personal, &calendar);
        assert!(matches!(
            result,
            Err(EngineError::MissingTableEntry { .. })
        ));
    }
}
