/*
* 开发心理过程：
* 1. 建模游戏版本和实体上下文，世代规则全部挂在这里
* 2. 版本到版本组(岛)的折叠决定尺寸/记忆等家族级分支
* 3. 每个世代的可获取物种上限用于存在性检查
*/

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::personal::PersonalTable;
use crate::data::species;

/// 游戏版本 - 单个卡带
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameVersion {
    Red,
    Blue,
    Yellow,
    Gold,
    Silver,
    Crystal,
    Ruby,
    Sapphire,
    Emerald,
    FireRed,
    LeafGreen,
    /// Colosseum/XD,GameCube血统,PID来源于IV播种的LCG
    ColosseumXD,
    Diamond,
    Pearl,
    Platinum,
    HeartGold,
    SoulSilver,
    Black,
    White,
    Black2,
    White2,
    X,
    Y,
    OmegaRuby,
    AlphaSapphire,
    Sun,
    Moon,
    UltraSun,
    UltraMoon,
    LetsGoPikachu,
    LetsGoEevee,
    Sword,
    Shield,
    BrilliantDiamond,
    ShiningPearl,
    LegendsArceus,
    Scarlet,
    Violet,
    LegendsZA,
}

/// 版本组 - 同家族的版本折叠
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VersionGroup {
    Gen1,
    Gsc,
    Rse,
    Frlg,
    Cxd,
    DpPt,
    Hgss,
    Bw,
    B2w2,
    Xy,
    Oras,
    Sm,
    Usum,
    Gg,
    Swsh,
    Bdsp,
    Pla,
    Sv,
    Za,
}

/// 实体上下文 - 数据格式所属的世代变体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityContext {
    Gen1,
    Gen2,
    Gen3,
    Gen4,
    Gen5,
    Gen6,
    Gen7,
    Gen7b,
    Gen8,
    Gen8a,
    Gen8b,
    Gen9,
    Gen9a,
}

impl fmt::Display for EntityContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl GameVersion {
    pub fn generation(self) -> u8 {
        use GameVersion::*;
        match self {
            Red | Blue | Yellow => 1,
            Gold | Silver | Crystal => 2,
            Ruby | Sapphire | Emerald | FireRed | LeafGreen | ColosseumXD => 3,
            Diamond | Pearl | Platinum | HeartGold | SoulSilver => 4,
            Black | White | Black2 | White2 => 5,
            X | Y | OmegaRuby | AlphaSapphire => 6,
            Sun | Moon | UltraSun | UltraMoon | LetsGoPikachu | LetsGoEevee => 7,
            Sword | Shield | BrilliantDiamond | ShiningPearl | LegendsArceus => 8,
            Scarlet | Violet | LegendsZA => 9,
        }
    }

    pub fn island(self) -> VersionGroup {
        use GameVersion::*;
        match self {
            Red | Blue | Yellow => VersionGroup::Gen1,
            Gold | Silver | Crystal => VersionGroup::Gsc,
            Ruby | Sapphire | Emerald => VersionGroup::Rse,
            FireRed | LeafGreen => VersionGroup::Frlg,
            ColosseumXD => VersionGroup::Cxd,
            Diamond | Pearl | Platinum => VersionGroup::DpPt,
            HeartGold | SoulSilver => VersionGroup::Hgss,
            Black | White => VersionGroup::Bw,
            Black2 | White2 => VersionGroup::B2w2,
            X | Y => VersionGroup::Xy,
            OmegaRuby | AlphaSapphire => VersionGroup::Oras,
            Sun | Moon => VersionGroup::Sm,
            UltraSun | UltraMoon => VersionGroup::Usum,
            LetsGoPikachu | LetsGoEevee => VersionGroup::Gg,
            Sword | Shield => VersionGroup::Swsh,
            BrilliantDiamond | ShiningPearl => VersionGroup::Bdsp,
            LegendsArceus => VersionGroup::Pla,
            Scarlet | Violet => VersionGroup::Sv,
            LegendsZA => VersionGroup::Za,
        }
    }

    pub fn context(self) -> EntityContext {
        use VersionGroup::*;
        match self.island() {
            Gen1 => EntityContext::Gen1,
            Gsc => EntityContext::Gen2,
            Rse | Frlg | Cxd => EntityContext::Gen3,
            DpPt | Hgss => EntityContext::Gen4,
            Bw | B2w2 => EntityContext::Gen5,
            Xy | Oras => EntityContext::Gen6,
            Sm | Usum => EntityContext::Gen7,
            Gg => EntityContext::Gen7b,
            Swsh => EntityContext::Gen8,
            Pla => EntityContext::Gen8a,
            Bdsp => EntityContext::Gen8b,
            Sv => EntityContext::Gen9,
            Za => EntityContext::Gen9a,
        }
    }

    /// 本世代原生可见的最大物种编号
    pub fn max_species_id(self) -> u16 {
        match self.generation() {
            1 => 151,
            2 => 251,
            3 => 386,
            4 => 493,
            5 => 649,
            6 => 721,
            7 => 809,
            8 => 905,
            _ => 1025,
        }
    }

    /// 目标版本里该物种/形态是否存在
    pub fn exists_in_game(self, species: u16, form: u8, personal: &dyn PersonalTable) -> bool {
        use VersionGroup::*;
        match self.island() {
            // LGPE只收录关都图鉴和美录坦一族
            Gg => species <= 151 || species == species::MELTAN || species == species::MELMETAL,
            Swsh | Pla | Sv | Za => personal.is_present_in_game(self.context(), species, form),
            _ => species <= self.max_species_id(),
        }
    }
}

impl EntityContext {
    pub fn generation(self) -> u8 {
        use EntityContext::*;
        match self {
            Gen1 => 1,
            Gen2 => 2,
            Gen3 => 3,
            Gen4 => 4,
            Gen5 => 5,
            Gen6 => 6,
            Gen7 | Gen7b => 7,
            Gen8 | Gen8a | Gen8b => 8,
            Gen9 | Gen9a => 9,
        }
    }

    /// 三个最新家族(记忆清空而非合成交换记忆)
    pub fn clears_handler_memories(self) -> bool {
        matches!(
            self,
            EntityContext::Gen8a | EntityContext::Gen8b | EntityContext::Gen9 | EntityContext::Gen9a
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::personal::InMemoryPersonalTable;

    #[test]
    fn test_island_folding() {
        assert_eq!(GameVersion::Sword.island(), VersionGroup::Swsh);
        assert_eq!(GameVersion::Shield.island(), VersionGroup::Swsh);
        assert_eq!(GameVersion::Black2.island(), VersionGroup::B2w2);
        assert_eq!(GameVersion::LetsGoPikachu.island(), VersionGroup::Gg);
    }

    #[test]
    fn test_generation_mapping() {
        assert_eq!(GameVersion::Crystal.generation(), 2);
        assert_eq!(GameVersion::ColosseumXD.generation(), 3);
        assert_eq!(GameVersion::Scarlet.generation(), 9);
        assert_eq!(EntityContext::Gen8b.generation(), 8);
    }

    #[test]
    fn test_lets_go_dex_rule() {
        let personal = InMemoryPersonalTable::default();
        let lgp = GameVersion::LetsGoPikachu;
        assert!(lgp.exists_in_game(25, 0, &personal));
        assert!(lgp.exists_in_game(species::MELTAN, 0, &personal));
        assert!(!lgp.exists_in_game(152, 0, &personal));
    }

    #[test]
    fn test_old_gen_species_cap() {
        let personal = InMemoryPersonalTable::default();
        assert!(GameVersion::Crystal.exists_in_game(251, 0, &personal));
        assert!(!GameVersion::Crystal.exists_in_game(252, 0, &personal));
    }
}
