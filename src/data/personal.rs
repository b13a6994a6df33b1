/*
* 开发心理过程：
* 1. 定义个体种族表的查询接口，具体表内容由外部提供
* 2. 引擎只依赖基础友好度、性别比、属性和形态存在性
* 3. 提供内存实现便于测试和小规模数据集
*/

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::data::species::{FormId, SpeciesId};
use crate::data::version::EntityContext;

/// 性别比魔法值,与原始数据表一致
pub const RATIO_MAGIC_GENDERLESS: u8 = 255;
pub const RATIO_MAGIC_FEMALE: u8 = 254;
pub const RATIO_MAGIC_MALE: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male = 0,
    Female = 1,
    Genderless = 2,
}

/// 单个物种/形态的种族条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub base_friendship: u8,
    /// 性别比(255=无性别,254=纯雌,0=纯雄)
    pub gender_ratio: u8,
    pub type1: String,
    pub type2: String,
    pub form_count: u8,
    pub present: bool,
}

impl PersonalInfo {
    /// 由性别比推导一个合理性别
    pub fn sane_gender(&self, roll: u8) -> Gender {
        match self.gender_ratio {
            RATIO_MAGIC_GENDERLESS => Gender::Genderless,
            RATIO_MAGIC_FEMALE => Gender::Female,
            RATIO_MAGIC_MALE => Gender::Male,
            ratio => {
                if roll < ratio {
                    Gender::Female
                } else {
                    Gender::Male
                }
            }
        }
    }

    pub fn is_gender_valid(&self, gender: Gender) -> bool {
        match self.gender_ratio {
            RATIO_MAGIC_GENDERLESS => gender == Gender::Genderless,
            RATIO_MAGIC_FEMALE => gender == Gender::Female,
            RATIO_MAGIC_MALE => gender == Gender::Male,
            _ => gender != Gender::Genderless,
        }
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.type1.eq_ignore_ascii_case(type_name) || self.type2.eq_ignore_ascii_case(type_name)
    }
}

/// 静态种族表查询接口 - 由外部数据代码实现
pub trait PersonalTable {
    fn form_entry(
        &self,
        context: EntityContext,
        species: SpeciesId,
        form: FormId,
    ) -> Option<&PersonalInfo>;

    fn is_present_in_game(&self, context: EntityContext, species: SpeciesId, form: FormId) -> bool {
        self.form_entry(context, species, form)
            .map(|info| info.present)
            .unwrap_or(false)
    }

    fn max_species_id(&self) -> SpeciesId;
}

/// 内存实现,键为(上下文,物种,形态)
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersonalTable {
    entries: HashMap<(EntityContext, SpeciesId, FormId), PersonalInfo>,
    max_species: SpeciesId,
}

impl InMemoryPersonalTable {
    pub fn insert(
        &mut self,
        context: EntityContext,
        species: SpeciesId,
        form: FormId,
        info: PersonalInfo,
    ) {
        self.max_species = self.max_species.max(species);
        self.entries.insert((context, species, form), info);
    }

    /// 同一条目注册到所有上下文,测试数据常用
    pub fn insert_all_contexts(&mut self, species: SpeciesId, form: FormId, info: PersonalInfo) {
        use EntityContext::*;
        for ctx in [
            Gen1, Gen2, Gen3, Gen4, Gen5, Gen6, Gen7, Gen7b, Gen8, Gen8a, Gen8b, Gen9, Gen9a,
        ] {
            self.insert(ctx, species, form, info.clone());
        }
    }
}

impl PersonalTable for InMemoryPersonalTable {
    fn form_entry(
        &self,
        context: EntityContext,
        species: SpeciesId,
        form: FormId,
    ) -> Option<&PersonalInfo> {
        self.entries
            .get(&(context, species, form))
            // 形态0兜底,区域形态之外的数据表常只带基础形态
            .or_else(|| self.entries.get(&(context, species, 0)))
    }

    fn max_species_id(&self) -> SpeciesId {
        self.max_species
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> PersonalInfo {
        PersonalInfo {
            base_friendship: 50,
            gender_ratio: 127,
            type1: "Electric".to_string(),
            type2: "Electric".to_string(),
            form_count: 1,
            present: true,
        }
    }

    #[test]
    fn test_form_zero_fallback() {
        let mut table = InMemoryPersonalTable::default();
        table.insert(EntityContext::Gen9, 25, 0, sample_info());
        assert!(table.form_entry(EntityContext::Gen9, 25, 3).is_some());
        assert!(table.form_entry(EntityContext::Gen8, 25, 0).is_none());
    }

    #[test]
    fn test_gender_magic_values() {
        let mut info = sample_info();
        info.gender_ratio = RATIO_MAGIC_GENDERLESS;
        assert_eq!(info.sane_gender(0), Gender::Genderless);
        assert!(info.is_gender_valid(Gender::Genderless));
        assert!(!info.is_gender_valid(Gender::Male));

        info.gender_ratio = RATIO_MAGIC_FEMALE;
        assert_eq!(info.sane_gender(200), Gender::Female);
    }

    #[test]
    fn test_has_type_case_insensitive() {
        let info = sample_info();
        assert!(info.has_type("electric"));
        assert!(!info.has_type("Fire"));
    }
}
