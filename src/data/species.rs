// 物种编号常量
// 开发心理：引擎逻辑只特判少量物种，用命名常量代替魔法数字

pub type SpeciesId = u16;
pub type FormId = u8;

pub const PIKACHU: SpeciesId = 25;
pub const PICHU: SpeciesId = 172;
pub const WURMPLE: SpeciesId = 265;
pub const SILCOON: SpeciesId = 266;
pub const CASCOON: SpeciesId = 268;
pub const MANAPHY: SpeciesId = 490;
pub const GIRATINA: SpeciesId = 487;
pub const SHAYMIN: SpeciesId = 492;
pub const ARCEUS: SpeciesId = 493;
pub const VICTINI: SpeciesId = 494;
pub const KELDEO: SpeciesId = 647;
pub const GENESECT: SpeciesId = 649;
pub const GRENINJA: SpeciesId = 658;
pub const SCATTERBUG: SpeciesId = 664;
pub const SPEWPA: SpeciesId = 665;
pub const VIVILLON: SpeciesId = 666;
pub const FLOETTE: SpeciesId = 670;
pub const FURFROU: SpeciesId = 676;
pub const MEOWSTIC: SpeciesId = 678;
pub const ZYGARDE: SpeciesId = 718;
pub const HOOPA: SpeciesId = 720;
pub const VOLCANION: SpeciesId = 721;
pub const SILVALLY: SpeciesId = 773;
pub const COSMOG: SpeciesId = 789;
pub const COSMOEM: SpeciesId = 790;
pub const MAGEARNA: SpeciesId = 801;
pub const MELTAN: SpeciesId = 808;
pub const MELMETAL: SpeciesId = 809;
pub const INDEEDEE: SpeciesId = 876;
pub const ZACIAN: SpeciesId = 888;
pub const ZAMAZENTA: SpeciesId = 889;
pub const KUBFU: SpeciesId = 891;
pub const URSHIFU: SpeciesId = 892;
pub const ZARUDE: SpeciesId = 893;
pub const GLASTRIER: SpeciesId = 896;
pub const SPECTRIER: SpeciesId = 897;
pub const CALYREX: SpeciesId = 898;
pub const ENAMORUS: SpeciesId = 905;
pub const MAUSHOLD: SpeciesId = 925;
pub const DUDUNSPARCE: SpeciesId = 982;
pub const GIMMIGHOUL: SpeciesId = 999;
pub const GHOLDENGO: SpeciesId = 1000;
pub const WO_CHIEN: SpeciesId = 1001;
pub const CHIEN_PAO: SpeciesId = 1002;
pub const TING_LU: SpeciesId = 1003;
pub const CHI_YU: SpeciesId = 1004;
pub const KORAIDON: SpeciesId = 1007;
pub const MIRAIDON: SpeciesId = 1008;
pub const WALKING_WAKE: SpeciesId = 1009;
pub const IRON_LEAVES: SpeciesId = 1010;
pub const OKIDOGI: SpeciesId = 1014;
pub const MUNKIDORI: SpeciesId = 1015;
pub const FEZANDIPITI: SpeciesId = 1016;
pub const OGERPON: SpeciesId = 1017;
pub const HYDRAPPLE: SpeciesId = 1019;
pub const GOUGING_FIRE: SpeciesId = 1020;
pub const RAGING_BOLT: SpeciesId = 1021;
pub const IRON_BOULDER: SpeciesId = 1022;
pub const IRON_CROWN: SpeciesId = 1023;
pub const TERAPAGOS: SpeciesId = 1024;
pub const PECHARUNT: SpeciesId = 1025;

/// 友好度敏感招式(迁怒),决定友好度设为0还是255
pub const MOVE_FRUSTRATION: u16 = 218;
pub const MOVE_SECRET_SWORD: u16 = 548;
pub const MOVE_DRAGON_CHEER: u16 = 903;
pub const MOVE_MAKE_IT_RAIN: u16 = 874;

/// 赛富豪的形态参数:集齐的古钱币数
pub const GHOLDENGO_COIN_COUNT: u32 = 999;
