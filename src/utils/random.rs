/*
* 开发心理过程：
* 1. 设计可注入的随机数生成器，取代进程级全局随机源
* 2. 实现可重现的随机序列，便于测试和调试
* 3. 所有合成路径共享同一个生成器实例
* 4. 提供针对身份值和日期的便捷取样方法
*/

use chrono::{Duration, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// 可播种随机数生成器
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
    seed: u64,
}

impl RandomSource {
    /// 使用熵种子创建
    pub fn new() -> Self {
        Self::with_seed(rand::random::<u64>())
    }

    /// 使用指定种子创建
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 32位随机值,用于PID和加密常数
    pub fn rand32(&mut self) -> u32 {
        self.rng.gen::<u32>()
    }

    /// [0, bound) 范围内的随机值
    pub fn below(&mut self, bound: u32) -> u32 {
        self.rng.gen_range(0..bound)
    }

    /// [min, max] 闭区间随机值
    pub fn range_inclusive(&mut self, min: u8, max: u8) -> u8 {
        self.rng.gen_range(min..=max)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// 从切片中等概率选取
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..items.len());
        Some(&items[idx])
    }

    /// 在闭区间日期窗口内随机取一天
    pub fn date_in_window(&mut self, start: NaiveDate, end: NaiveDate) -> NaiveDate {
        let days = (end - start).num_days().max(0);
        start + Duration::days(self.rng.gen_range(0..=days))
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}
