/*
* 开发心理过程:
* 1. 训练家字段分三层:身份(名字/TID/SID)、友好度、持有人与记忆
* 2. 友好度的槽位取决于原始训练家能否持有这只实体,判断全在遭遇模板上
* 3. 新家族清空记忆字段,旧家族写合成的交易记忆,两套路径不可混
*/

use log::debug;

use crate::core::error::{EngineError, EngineResult};
use crate::data::personal::PersonalTable;
use crate::data::species::MOVE_FRUSTRATION;
use crate::data::version::EntityContext;
use crate::encounter::EncounterTemplate;
use crate::synth::entity::{SynthesizedEntity, TradeMemory, TrainerContext};

/// 默认的主机地理三元组,调用方未提供时兜底
const DEFAULT_CONSOLE_REGION: u8 = 1;
const DEFAULT_COUNTRY: u8 = 49;
const DEFAULT_REGION: u8 = 7;

/// 写入原始训练家身份
pub fn apply_trainer_identity(
    entity: &mut SynthesizedEntity,
    trainer: &TrainerContext,
    template: &EncounterTemplate,
) {
    entity.ot_name = trainer.ot_name.clone();
    entity.ot_gender = trainer.gender;
    entity.language = trainer.language;
    entity.tid16 = trainer.tid16;
    // 世代1/2没有里ID字段
    entity.sid16 = if template.generation() >= 3 {
        trainer.sid16
    } else {
        0
    };
    if entity.format() >= 6 && entity.format() <= 7 {
        entity.geo = Some(trainer.region.unwrap_or(crate::synth::entity::GeoRegion {
            console_region: DEFAULT_CONSOLE_REGION,
            country: DEFAULT_COUNTRY,
            region: DEFAULT_REGION,
        }));
    }
}

/// 写入友好度:基础值查种族表,"牵制"携带者压到0
pub fn apply_friendship(
    entity: &mut SynthesizedEntity,
    template: &EncounterTemplate,
    personal: &dyn PersonalTable,
) -> EngineResult<()> {
    // 老两代的表没有按形态的基础友好度,VC转移统一参照第七世代的值,
    // 持有人字段不碰
    if template.generation() <= 2 {
        entity.ot_friendship = base_friendship(personal, EntityContext::Gen7, entity)?;
        return Ok(());
    }

    if template.can_ot_handle() {
        let value = if entity.has_move(MOVE_FRUSTRATION) { 0 } else { 255 };
        entity.set_current_friendship(value);
        return Ok(());
    }

    entity.ot_friendship = match template.fixed_ot_friendship {
        Some(fixed) => fixed,
        None => base_friendship(personal, entity.context, entity)?,
    };
    entity.ht_friendship = if entity.has_move(MOVE_FRUSTRATION) { 0 } else { 255 };
    Ok(())
}

fn base_friendship(
    personal: &dyn PersonalTable,
    context: EntityContext,
    entity: &SynthesizedEntity,
) -> EngineResult<u8> {
    personal
        .form_entry(context, entity.species, entity.form)
        .map(|info| info.base_friendship)
        .ok_or_else(|| EngineError::MissingTableEntry {
            species: entity.species,
            form: entity.form,
            context: context.to_string(),
        })
}

/// 写入当前持有人与记忆字段
pub fn apply_handler_and_memory(
    entity: &mut SynthesizedEntity,
    trainer: &TrainerContext,
    template: &EncounterTemplate,
) {
    let untradeable = template.is_untradeable();
    let owned = template.can_ot_handle() || trainer.is_from_trainer(entity);
    if untradeable || owned {
        entity.current_handler = 0;
        entity.ht_name.clear();
        entity.ht_gender = crate::data::personal::Gender::Male;
        entity.ht_memory = None;
        debug!("实体留在原始训练家手里: species={}", entity.species);
        return;
    }

    entity.current_handler = 1;
    entity.ht_name = trainer.ot_name.clone();
    entity.ht_gender = trainer.gender;
    if entity.context.clears_handler_memories() {
        entity.ht_memory = None;
    } else if entity.format() >= 6 {
        entity.ht_memory = Some(TradeMemory::traded());
    }
}

/// 第二持有人语言:0或6(未使用值)回落到英语
pub fn apply_handler_language(entity: &mut SynthesizedEntity, preferred: u8) {
    if entity.current_handler == 0 {
        return;
    }
    entity.ht_language = match preferred {
        0 | 6 => 2,
        lang => lang,
    };
}

/// LGPE御三家等不可交易来源必须由目标训练家原生持有
pub fn requires_native_trainer(template: &EncounterTemplate) -> bool {
    template.is_untradeable()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::personal::{Gender, InMemoryPersonalTable, PersonalInfo};
    use crate::data::version::GameVersion;
    use crate::data::species;
    use crate::encounter::{sample_template, EncounterKind};

    fn table(base_friendship: u8) -> InMemoryPersonalTable {
        let mut t = InMemoryPersonalTable::default();
        let info = PersonalInfo {
            base_friendship,
            gender_ratio: 127,
            type1: "Electric".to_string(),
            type2: String::new(),
            form_count: 1,
            present: true,
        };
        t.insert_all_contexts(species::PIKACHU, 0, info);
        t
    }

    fn trainer() -> TrainerContext {
        TrainerContext {
            ot_name: "Juliana".to_string(),
            tid16: 100,
            sid16: 200,
            gender: Gender::Female,
            language: 2,
            version: GameVersion::Scarlet,
            region: None,
        }
    }

    fn entity() -> SynthesizedEntity {
        SynthesizedEntity::blank(
            species::PIKACHU,
            0,
            GameVersion::Scarlet,
            EntityContext::Gen9,
        )
    }

    #[test]
    fn test_identity_pre_gen3_has_no_sid() {
        let mut e = entity();
        let t = sample_template(EncounterKind::WildSlot, GameVersion::Crystal);
        apply_trainer_identity(&mut e, &trainer(), &t);
        assert_eq!(e.sid16, 0);
        assert_eq!(e.tid16, 100);
        assert_eq!(e.ot_name, "Juliana");
    }

    #[test]
    fn test_ot_handled_gets_max_friendship() {
        let mut e = entity();
        let t = sample_template(EncounterKind::WildSlot, GameVersion::Scarlet);
        let table = table(50);
        apply_friendship(&mut e, &t, &table).unwrap();
        assert_eq!(e.ot_friendship, 255);
    }

    #[test]
    fn test_frustration_zeroes_friendship() {
        let mut e = entity();
        e.moves = vec![MOVE_FRUSTRATION];
        let t = sample_template(EncounterKind::WildSlot, GameVersion::Scarlet);
        let table = table(50);
        apply_friendship(&mut e, &t, &table).unwrap();
        assert_eq!(e.ot_friendship, 0);
    }

    #[test]
    fn test_traded_source_keeps_base_for_ot() {
        let mut e = entity();
        let t = sample_template(EncounterKind::Trade, GameVersion::Scarlet);
        let table = table(50);
        apply_friendship(&mut e, &t, &table).unwrap();
        assert_eq!(e.ot_friendship, 50);
        assert_eq!(e.ht_friendship, 255);
    }

    #[test]
    fn test_old_generation_pins_modern_base() {
        let mut e = entity();
        e.context = EntityContext::Gen2;
        let t = sample_template(EncounterKind::WildSlot, GameVersion::Crystal);
        let table = table(70);
        apply_friendship(&mut e, &t, &table).unwrap();
        assert_eq!(e.ot_friendship, 70);
        // 持有人友好度不随VC转移写入
        assert_eq!(e.ht_friendship, 0);
    }

    #[test]
    fn test_missing_table_entry_is_error() {
        let mut e = entity();
        e.species = 9999;
        let t = sample_template(EncounterKind::Trade, GameVersion::Scarlet);
        let table = table(50);
        assert!(apply_friendship(&mut e, &t, &table).is_err());
    }

    #[test]
    fn test_traded_entity_gets_second_handler() {
        let mut e = entity();
        e.ot_name = "Somebody".to_string();
        e.tid16 = 1;
        e.sid16 = 2;
        let t = sample_template(EncounterKind::Trade, GameVersion::Scarlet);
        apply_handler_and_memory(&mut e, &trainer(), &t);
        assert_eq!(e.current_handler, 1);
        assert_eq!(e.ht_name, "Juliana");
        // 最新家族清空记忆
        assert!(e.ht_memory.is_none());
    }

    #[test]
    fn test_traded_entity_old_family_gets_memory() {
        let mut e = entity();
        e.context = EntityContext::Gen7;
        e.ot_name = "Somebody".to_string();
        let t = sample_template(EncounterKind::Trade, GameVersion::Sun);
        apply_handler_and_memory(&mut e, &trainer(), &t);
        assert_eq!(e.ht_memory, Some(TradeMemory::traded()));
    }

    #[test]
    fn test_owned_entity_stays_with_ot() {
        let mut e = entity();
        let t = sample_template(EncounterKind::WildSlot, GameVersion::Scarlet);
        apply_trainer_identity(&mut e, &trainer(), &t);
        apply_handler_and_memory(&mut e, &trainer(), &t);
        assert_eq!(e.current_handler, 0);
        assert!(e.ht_name.is_empty());
    }

    #[test]
    fn test_handler_language_fallback() {
        let mut e = entity();
        e.current_handler = 1;
        apply_handler_language(&mut e, 0);
        assert_eq!(e.ht_language, 2);
        apply_handler_language(&mut e, 1);
        assert_eq!(e.ht_language, 1);
    }
}
