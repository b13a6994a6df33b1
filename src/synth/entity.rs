/*
* 开发心理过程：
* 1. 合成中的实体是每次尝试新建的可变记录,被接受后视为不可变
* 2. 闪光异或/阈值等位级运算集中在这里,各世代规则引用同一实现
* 3. 训练家上下文只读,世代7以上的TID/SID打包走百万模数变换
*/

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::personal::Gender;
use crate::data::species::{FormId, SpeciesId};
use crate::data::version::{EntityContext, GameVersion};
use crate::utils::random::RandomSource;

/// 世代7+的TID/SID显示打包模数
pub const TRAINER_ID7_MODULUS: u32 = 1_000_000;

/// 地理来源三元组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoRegion {
    pub console_region: u8,
    pub country: u8,
    pub region: u8,
}

/// 调用方提供的训练家上下文,核心只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerContext {
    pub ot_name: String,
    pub tid16: u16,
    pub sid16: u16,
    pub gender: Gender,
    pub language: u8,
    pub version: GameVersion,
    pub region: Option<GeoRegion>,
}

impl TrainerContext {
    pub fn generation(&self) -> u8 {
        self.version.generation()
    }

    pub fn context(&self) -> EntityContext {
        self.version.context()
    }

    /// 世代7+的显示TID:32位组合值对百万取模
    pub fn display_tid(&self) -> u32 {
        let combined = self.combined_id();
        if self.generation() >= 7 {
            combined % TRAINER_ID7_MODULUS
        } else {
            self.tid16 as u32
        }
    }

    /// 世代7+的显示SID:32位组合值除以百万
    pub fn display_sid(&self) -> u32 {
        let combined = self.combined_id();
        if self.generation() >= 7 {
            combined / TRAINER_ID7_MODULUS
        } else {
            self.sid16 as u32
        }
    }

    fn combined_id(&self) -> u32 {
        ((self.sid16 as u32) << 16) | self.tid16 as u32
    }

    /// 由显示值重新打包成16位对;世代7以下直接取低16位
    pub fn set_display_ids(&mut self, tid: u32, sid: u32) {
        if self.generation() >= 7 {
            let combined = sid.wrapping_mul(TRAINER_ID7_MODULUS).wrapping_add(tid);
            self.tid16 = (combined & 0xFFFF) as u16;
            self.sid16 = (combined >> 16) as u16;
        } else {
            self.tid16 = (tid & 0xFFFF) as u16;
            self.sid16 = (sid & 0xFFFF) as u16;
        }
    }

    /// 实体是否来源于这位训练家
    pub fn is_from_trainer(&self, entity: &SynthesizedEntity) -> bool {
        entity.ot_name == self.ot_name
            && entity.tid16 == self.tid16
            && entity.sid16 == self.sid16
    }
}

/// 合成的交易记忆
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeMemory {
    pub memory_type: u8,
    pub intensity: u8,
    pub text_var: u16,
    pub feeling: u8,
}

impl TradeMemory {
    /// 旧家族的"被交易"合成记忆
    pub fn traded() -> Self {
        Self {
            memory_type: 4,
            intensity: 1,
            text_var: 9,
            feeling: 5,
        }
    }
}

/// 合成中的实体记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizedEntity {
    pub species: SpeciesId,
    pub form: FormId,
    /// 形态参数(金币数/英雄击杀数等形态附带计数)
    pub form_argument: u32,
    /// 来源版本(遭遇模板所属)
    pub version: GameVersion,
    /// 当前数据格式上下文(目标存档)
    pub context: EntityContext,
    pub level: u8,
    pub gender: Gender,
    pub nature: u8,
    pub ability_slot: u8,

    pub pid: u32,
    pub encryption_constant: u32,

    pub ivs: [u8; 6],
    pub evs: [u8; 6],
    pub hyper_train: [bool; 6],

    pub ot_name: String,
    pub tid16: u16,
    pub sid16: u16,
    pub ot_gender: Gender,
    pub ot_friendship: u8,
    pub language: u8,
    pub geo: Option<GeoRegion>,

    /// 0=原始训练家持有,1=第二持有人
    pub current_handler: u8,
    pub ht_name: String,
    pub ht_gender: Gender,
    pub ht_language: u8,
    pub ht_friendship: u8,
    pub ht_memory: Option<TradeMemory>,

    pub held_item: Option<u16>,
    pub moves: Vec<u16>,
    pub relearn_moves: [u16; 4],
    pub record_flags: Vec<u16>,

    pub height_scalar: u8,
    pub weight_scalar: u8,
    pub scale: Option<u8>,

    pub can_gigantamax: bool,
    pub dynamax_level: u8,
    pub tera_type: Option<String>,

    pub met_date: Option<NaiveDate>,
    pub met_location: u16,
    pub ribbon_mark_mightiest: bool,
}

impl SynthesizedEntity {
    pub fn blank(species: SpeciesId, form: FormId, version: GameVersion, context: EntityContext) -> Self {
        Self {
            species,
            form,
            form_argument: 0,
            version,
            context,
            level: 1,
            gender: Gender::Genderless,
            nature: 0,
            ability_slot: 0,
            pid: 0,
            encryption_constant: 0,
            ivs: [0; 6],
            evs: [0; 6],
            hyper_train: [false; 6],
            ot_name: String::new(),
            tid16: 0,
            sid16: 0,
            ot_gender: Gender::Male,
            ot_friendship: 0,
            language: 2,
            geo: None,
            current_handler: 0,
            ht_name: String::new(),
            ht_gender: Gender::Male,
            ht_language: 0,
            ht_friendship: 0,
            ht_memory: None,
            held_item: None,
            moves: Vec::new(),
            relearn_moves: [0; 4],
            record_flags: Vec::new(),
            height_scalar: 0,
            weight_scalar: 0,
            scale: None,
            can_gigantamax: false,
            dynamax_level: 0,
            tera_type: None,
            met_date: None,
            met_location: 0,
            ribbon_mark_mightiest: false,
        }
    }

    /// 数据格式世代
    pub fn format(&self) -> u8 {
        self.context.generation()
    }

    /// 闪光异或:TID ^ SID ^ PID高半 ^ PID低半
    pub fn shiny_xor(&self) -> u16 {
        (self.tid16 ^ self.sid16 ^ (self.pid >> 16) as u16 ^ (self.pid & 0xFFFF) as u16) as u16
    }

    /// 闪光阈值:世代6起为16,之前为8
    pub fn shiny_threshold(&self) -> u16 {
        if self.format() >= 6 {
            16
        } else {
            8
        }
    }

    pub fn is_shiny(&self) -> bool {
        self.shiny_xor() < self.shiny_threshold()
    }

    /// 随机重掷身份值直到失去闪光
    pub fn set_unshiny(&mut self, rng: &mut RandomSource, max_iterations: u32) {
        for _ in 0..max_iterations {
            if !self.is_shiny() {
                return;
            }
            self.pid = rng.rand32();
        }
    }

    pub fn has_move(&self, move_id: u16) -> bool {
        self.moves.contains(&move_id)
    }

    /// 按当前持有人写友好度
    pub fn set_current_friendship(&mut self, value: u8) {
        if self.current_handler == 0 {
            self.ot_friendship = value;
        } else {
            self.ht_friendship = value;
        }
    }

    pub fn clear_relearn_moves(&mut self) {
        self.relearn_moves = [0; 4];
    }
}

/// 由TID/SID/低半解出高半,使异或桶恰为给定值
pub fn shiny_pid(tid: u16, sid: u16, pid: u32, xor_target: u16) -> u32 {
    let high = (tid ^ sid ^ (pid & 0xFFFF) as u16 ^ xor_target) as u32;
    (high << 16) | (pid & 0xFFFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> SynthesizedEntity {
        SynthesizedEntity::blank(25, 0, GameVersion::Sword, EntityContext::Gen8)
    }

    #[test]
    fn test_shiny_pid_hits_exact_xor() {
        let mut e = entity();
        e.tid16 = 54321;
        e.sid16 = 12345;
        e.pid = 0xDEADBEEF;
        for target in [0u16, 1, 7, 15] {
            e.pid = shiny_pid(e.tid16, e.sid16, e.pid, target);
            assert_eq!(e.shiny_xor(), target);
        }
    }

    #[test]
    fn test_shiny_threshold_by_format() {
        let mut e = entity();
        assert_eq!(e.shiny_threshold(), 16);
        e.context = EntityContext::Gen5;
        assert_eq!(e.shiny_threshold(), 8);
    }

    #[test]
    fn test_display_id_packing_gen9() {
        let trainer = TrainerContext {
            ot_name: "Nemona".to_string(),
            tid16: 0x1234,
            sid16: 0x5678,
            gender: Gender::Female,
            language: 2,
            version: GameVersion::Scarlet,
            region: None,
        };
        let combined = ((0x5678u32) << 16) | 0x1234;
        assert_eq!(trainer.display_tid(), combined % TRAINER_ID7_MODULUS);
        assert_eq!(trainer.display_sid(), combined / TRAINER_ID7_MODULUS);
    }

    #[test]
    fn test_display_id_passthrough_pre_gen7() {
        let trainer = TrainerContext {
            ot_name: "Gold".to_string(),
            tid16: 33333,
            sid16: 44444,
            gender: Gender::Male,
            language: 2,
            version: GameVersion::Emerald,
            region: None,
        };
        assert_eq!(trainer.display_tid(), 33333);
        assert_eq!(trainer.display_sid(), 44444);
    }

    #[test]
    fn test_display_id_roundtrip_gen7() {
        let mut trainer = TrainerContext {
            ot_name: "Selene".to_string(),
            tid16: 0,
            sid16: 0,
            gender: Gender::Female,
            language: 2,
            version: GameVersion::Moon,
            region: None,
        };
        trainer.set_display_ids(123456, 4021);
        assert_eq!(trainer.display_tid(), 123456);
        assert_eq!(trainer.display_sid(), 4021);
    }

    #[test]
    fn test_set_unshiny() {
        let mut e = entity();
        e.tid16 = 1;
        e.sid16 = 1;
        e.pid = shiny_pid(1, 1, 0xABCD1234, 0);
        assert!(e.is_shiny());
        let mut rng = RandomSource::with_seed(5);
        e.set_unshiny(&mut rng, 1000);
        assert!(!e.is_shiny());
    }
}
