/*
* 开发心理过程:
* 1. 日期锁来自两处:HOME礼物的配信窗口与"最强证"团战的活动日历
* 2. 窗口外的相遇日期必被外部校验拒绝,所以这里主动拉回窗口内
* 3. 日历缺条目时保持现状,不要编造不存在的活动日期
*/

use log::debug;

use crate::data::events::EventCalendar;
use crate::encounter::EncounterTemplate;
use crate::synth::entity::SynthesizedEntity;
use crate::utils::random::RandomSource;

/// HOME礼物:相遇日期钉在配信窗口起点
pub fn apply_distribution_window(entity: &mut SynthesizedEntity, template: &EncounterTemplate) {
    if !template.home_gift {
        return;
    }
    if let Some(window) = &template.window {
        entity.met_date = Some(window.start);
    }
}

/// 最强证团战:相遇日期必须落在对应物种的活动窗口里
pub fn apply_unrivaled_date(
    entity: &mut SynthesizedEntity,
    calendar: &EventCalendar,
    rng: &mut RandomSource,
) {
    if !entity.ribbon_mark_mightiest {
        return;
    }
    let Some(windows) = calendar.windows_for(entity.species, entity.form) else {
        debug!(
            "最强证无活动窗口: species={} form={}",
            entity.species, entity.form
        );
        return;
    };
    if let Some(date) = entity.met_date {
        if windows.iter().any(|w| w.contains(date)) {
            return;
        }
    }
    if let Some(window) = rng.pick(windows) {
        entity.met_date = Some(rng.date_in_window(window.start, window.end));
    }
}
