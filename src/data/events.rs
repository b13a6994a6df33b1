/*
* 开发心理过程：
* 1. 事件日期窗口和团战性别锁是会随官方活动更新的大型字面量表
* 2. 外置为声明式JSON数据,启动时解析,更新数据不需要改动逻辑
* 3. 形态特定条目优先于物种级条目(洗翠形态有独立活动档期)
*/

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::error::{EngineError, EngineResult};
use crate::data::personal::Gender;
use crate::data::species::{FormId, SpeciesId};
use crate::utils::random::RandomSource;

const EVENT_WINDOWS_JSON: &str = include_str!("../../data/event_windows.json");
const GENDER_LOCKS_JSON: &str = include_str!("../../data/raid_gender_locks.json");

/// 闭区间配信日期窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[derive(Debug, Clone, Deserialize)]
struct WindowEntry {
    species: SpeciesId,
    form: Option<FormId>,
    windows: Vec<(NaiveDate, NaiveDate)>,
}

#[derive(Debug, Clone, Deserialize)]
struct GenderLockEntry {
    species: SpeciesId,
    form: Option<FormId>,
    gender: Gender,
}

/// 七星团战("无敌"标记)配信日历
#[derive(Debug, Clone, Default)]
pub struct EventCalendar {
    windows: HashMap<(SpeciesId, Option<FormId>), Vec<DateRange>>,
    gender_locks: HashMap<(SpeciesId, Option<FormId>), Gender>,
}

impl EventCalendar {
    /// 加载内置数据表
    pub fn bundled() -> EngineResult<Self> {
        Self::from_json(EVENT_WINDOWS_JSON, GENDER_LOCKS_JSON)
    }

    pub fn from_json(windows_json: &str, gender_json: &str) -> EngineResult<Self> {
        let entries: Vec<WindowEntry> = serde_json::from_str(windows_json)
            .map_err(|e| EngineError::CalendarError(format!("event windows: {}", e)))?;
        let locks: Vec<GenderLockEntry> = serde_json::from_str(gender_json)
            .map_err(|e| EngineError::CalendarError(format!("gender locks: {}", e)))?;

        let mut calendar = Self::default();
        for entry in entries {
            let ranges = entry
                .windows
                .into_iter()
                .map(|(start, end)| DateRange { start, end })
                .collect();
            calendar.windows.insert((entry.species, entry.form), ranges);
        }
        for lock in locks {
            calendar
                .gender_locks
                .insert((lock.species, lock.form), lock.gender);
        }
        Ok(calendar)
    }

    /// 形态特定条目优先,否则退回物种级条目
    pub fn windows_for(&self, species: SpeciesId, form: FormId) -> Option<&[DateRange]> {
        self.windows
            .get(&(species, Some(form)))
            .or_else(|| self.windows.get(&(species, None)))
            .map(Vec::as_slice)
    }

    pub fn is_date_valid(&self, species: SpeciesId, form: FormId, date: NaiveDate) -> bool {
        match self.windows_for(species, form) {
            Some(ranges) => ranges.iter().any(|r| r.contains(date)),
            None => false,
        }
    }

    /// 从有效窗口中随机取一天
    pub fn pick_date(
        &self,
        species: SpeciesId,
        form: FormId,
        rng: &mut RandomSource,
    ) -> Option<NaiveDate> {
        let ranges = self.windows_for(species, form)?;
        let range = rng.pick(ranges)?;
        Some(rng.date_in_window(range.start, range.end))
    }

    /// 七星团战的性别锁
    pub fn mighty_raid_gender(&self, species: SpeciesId, form: FormId) -> Option<Gender> {
        self.gender_locks
            .get(&(species, Some(form)))
            .or_else(|| self.gender_locks.get(&(species, None)))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> EventCalendar {
        EventCalendar::bundled().unwrap()
    }

    #[test]
    fn test_bundled_data_parses() {
        let cal = calendar();
        assert!(cal.windows_for(25, 0).is_some());
        assert!(cal.windows_for(9999, 0).is_none());
    }

    #[test]
    fn test_form_specific_window_preferred() {
        let windows = r#"[
            { "species": 503, "windows": [["2023-03-31", "2023-04-02"]] },
            { "species": 503, "form": 1, "windows": [["2023-04-07", "2023-04-09"]] }
        ]"#;
        let cal = EventCalendar::from_json(windows, "[]").unwrap();
        let base = cal.windows_for(503, 0).unwrap();
        let hisui = cal.windows_for(503, 1).unwrap();
        assert_ne!(base[0].start, hisui[0].start);
    }

    #[test]
    fn test_date_validity() {
        let cal = calendar();
        let inside = NaiveDate::from_ymd_opt(2023, 2, 25).unwrap();
        let outside = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(cal.is_date_valid(25, 0, inside));
        assert!(!cal.is_date_valid(25, 0, outside));
    }

    #[test]
    fn test_pick_date_lands_in_window() {
        let cal = calendar();
        let mut rng = RandomSource::with_seed(99);
        for _ in 0..32 {
            let date = cal.pick_date(25, 0, &mut rng).unwrap();
            assert!(cal.is_date_valid(25, 0, date));
        }
    }

    #[test]
    fn test_gender_locks() {
        let cal = calendar();
        assert_eq!(cal.mighty_raid_gender(150, 0), Some(Gender::Genderless));
        assert_eq!(cal.mighty_raid_gender(133, 0), Some(Gender::Female));
        assert_eq!(cal.mighty_raid_gender(1, 0), None);
    }
}
