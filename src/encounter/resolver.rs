/*
* 开发心理过程：
* 1. 外部枚举器给出原始遭遇记录,这里做分类/过滤/排序
* 2. 分类靠名称/标签检查:蛋类归Egg,静态礼物归StaticGift,以此类推
* 3. 结果序列有限且可重启,同样输入+同样外部表状态必然产出同样序列
*/

use log::debug;

use crate::data::events::DateRange;
use crate::data::personal::Gender;
use crate::data::species::{FormId, SpeciesId};
use crate::data::version::GameVersion;
use crate::encounter::{EncounterKind, EncounterTemplate, RaidKind, TemplateShiny};

/// 外部遭遇枚举器给出的原始记录
#[derive(Debug, Clone)]
pub struct RawEncounter {
    /// 校验器自己的遭遇类型名,分类依据
    pub name: String,
    pub species: SpeciesId,
    pub form: FormId,
    pub level_min: u8,
    pub level_max: u8,
    pub shiny: TemplateShiny,
    pub has_fixed_pid: bool,
    pub has_fixed_size: bool,
    pub has_native_size_values: bool,
    pub home_gift: bool,
    pub gift_scalars: Option<(u8, u8)>,
    pub fixed_ec_zero: bool,
    pub window: Option<DateRange>,
    pub required_gender: Option<Gender>,
    pub fixed_ot_friendship: Option<u8>,
    pub location: u16,
}

impl RawEncounter {
    pub fn named(name: &str, species: SpeciesId, form: FormId) -> Self {
        Self {
            name: name.to_string(),
            species,
            form,
            level_min: 1,
            level_max: 100,
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
        }
    }
}

/// 遭遇枚举oracle - 外部生成器实现
pub trait EncounterSource {
    fn enumerate(&self, species: SpeciesId, form: FormId, version: GameVersion)
        -> Vec<RawEncounter>;
}

/// 按名称/标签检查分类遭遇种类
pub fn classify(name: &str) -> EncounterKind {
    if name.contains("Egg") {
        return EncounterKind::Egg;
    }
    if name.contains("MaxLair") || name.contains("Underground") {
        return EncounterKind::Raid(RaidKind::MaxLair);
    }
    if name.contains("RaidCrystal") {
        return EncounterKind::Raid(RaidKind::Crystal);
    }
    if name.contains("RaidDistribution") {
        return EncounterKind::Raid(RaidKind::Distribution);
    }
    if name.contains("Tera") {
        return EncounterKind::Raid(RaidKind::Tera);
    }
    if name.contains("Raid") || name.contains("Nest") {
        return EncounterKind::Raid(RaidKind::Standard);
    }
    if name.contains("Mystery") || name.contains("WC") {
        return EncounterKind::MysteryGift;
    }
    if name.contains("Static") || name.contains("Gift") {
        return EncounterKind::StaticGift;
    }
    if name.contains("Trade") {
        return EncounterKind::Trade;
    }
    if name.contains("Wild") || name.contains("Slot") {
        return EncounterKind::WildSlot;
    }
    // 其余按校验器标签原样透传
    EncounterKind::Fixed(name.to_string())
}

/// 遭遇解析器,排序优先级可配置
#[derive(Debug, Clone)]
pub struct EncounterResolver {
    priority: Vec<EncounterKind>,
}

impl EncounterResolver {
    pub fn new(priority: Vec<EncounterKind>) -> Self {
        Self { priority }
    }

    /// 枚举/分类/排序,并为每个模板标注最低可获取等级
    pub fn resolve(
        &self,
        source: &dyn EncounterSource,
        species: SpeciesId,
        form: FormId,
        version: GameVersion,
    ) -> Vec<EncounterTemplate> {
        let raw = source.enumerate(species, form, version);
        debug!(
            "resolver: {} raw encounters for species {} form {} in {:?}",
            raw.len(),
            species,
            form,
            version
        );

        let mut templates: Vec<EncounterTemplate> = raw
            .into_iter()
            .map(|enc| self.into_template(enc, version))
            .collect();

        // 非蛋遭遇的最低等级;只有蛋时为1
        let min_level = templates
            .iter()
            .filter(|t| !t.is_egg())
            .map(|t| t.level_min)
            .min()
            .unwrap_or(1);
        for template in &mut templates {
            template.min_obtainable_level = min_level;
        }

        templates.sort_by_key(|t| self.rank(&t.kind));
        templates
    }

    fn into_template(&self, raw: RawEncounter, version: GameVersion) -> EncounterTemplate {
        EncounterTemplate {
            kind: classify(&raw.name),
            species: raw.species,
            form: raw.form,
            version,
            level_min: raw.level_min,
            level_max: raw.level_max,
            shiny: raw.shiny,
            has_fixed_pid: raw.has_fixed_pid,
            has_fixed_size: raw.has_fixed_size,
            has_native_size_values: raw.has_native_size_values,
            home_gift: raw.home_gift,
            gift_scalars: raw.gift_scalars,
            fixed_ec_zero: raw.fixed_ec_zero,
            window: raw.window,
            required_gender: raw.required_gender,
            fixed_ot_friendship: raw.fixed_ot_friendship,
            location: raw.location,
            min_obtainable_level: 1,
        }
    }

    /// 配置列表中的位置决定排序,未列出的种类排最后
    fn rank(&self, kind: &EncounterKind) -> usize {
        self.priority
            .iter()
            .position(|p| p == kind)
            .unwrap_or(self.priority.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ResolverConfig;

    struct StubSource(Vec<RawEncounter>);

    impl EncounterSource for StubSource {
        fn enumerate(&self, _: SpeciesId, _: FormId, _: GameVersion) -> Vec<RawEncounter> {
            self.0.clone()
        }
    }

    fn resolver() -> EncounterResolver {
        EncounterResolver::new(ResolverConfig::default().priority)
    }

    #[test]
    fn test_classification_by_name() {
        assert_eq!(classify("EncounterEgg8"), EncounterKind::Egg);
        assert_eq!(classify("EncounterStatic9"), EncounterKind::StaticGift);
        assert_eq!(classify("EncounterTrade8b"), EncounterKind::Trade);
        assert_eq!(classify("EncounterSlot7"), EncounterKind::WildSlot);
        assert_eq!(
            classify("EncounterMaxLair8"),
            EncounterKind::Raid(RaidKind::MaxLair)
        );
        assert_eq!(
            classify("EncounterRaidCrystal8"),
            EncounterKind::Raid(RaidKind::Crystal)
        );
        assert_eq!(classify("MysteryGiftCard"), EncounterKind::MysteryGift);
        assert_eq!(
            classify("EncounterFossil"),
            EncounterKind::Fixed("EncounterFossil".to_string())
        );
    }

    #[test]
    fn test_priority_ordering() {
        let source = StubSource(vec![
            RawEncounter::named("EncounterSlot8", 25, 0),
            RawEncounter::named("EncounterEgg8", 25, 0),
            RawEncounter::named("EncounterStatic8", 25, 0),
        ]);
        let templates = resolver().resolve(&source, 25, 0, GameVersion::Sword);
        assert_eq!(templates[0].kind, EncounterKind::Egg);
        assert_eq!(templates[1].kind, EncounterKind::StaticGift);
        assert_eq!(templates[2].kind, EncounterKind::WildSlot);
    }

    #[test]
    fn test_min_level_skips_eggs() {
        let mut egg = RawEncounter::named("EncounterEgg8", 25, 0);
        egg.level_min = 1;
        let mut wild = RawEncounter::named("EncounterSlot8", 25, 0);
        wild.level_min = 26;
        let mut gift = RawEncounter::named("EncounterStatic8", 25, 0);
        gift.level_min = 10;

        let source = StubSource(vec![egg, wild, gift]);
        let templates = resolver().resolve(&source, 25, 0, GameVersion::Sword);
        assert!(templates.iter().all(|t| t.min_obtainable_level == 10));
    }

    #[test]
    fn test_egg_only_min_level_is_one() {
        let mut egg = RawEncounter::named("EncounterEgg8", 25, 0);
        egg.level_min = 1;
        let source = StubSource(vec![egg]);
        let templates = resolver().resolve(&source, 25, 0, GameVersion::Sword);
        assert_eq!(templates[0].min_obtainable_level, 1);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let source = StubSource(vec![
            RawEncounter::named("EncounterSlot8", 25, 0),
            RawEncounter::named("EncounterEgg8", 25, 0),
        ]);
        let resolver = resolver();
        let a = resolver.resolve(&source, 25, 0, GameVersion::Sword);
        let b = resolver.resolve(&source, 25, 0, GameVersion::Sword);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.kind, y.kind);
        }
    }
}
