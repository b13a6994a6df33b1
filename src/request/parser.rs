/*
* 开发心理过程：
* 1. 解析扩展请求文本:基础属性行+自由形式的指令/过滤行
* 2. 名称到编号的映射依赖外部本地化名称表,以oracle接口注入
* 3. 训练家覆盖行走旁路通道,不污染实体字段
* 4. 无法识别的"键:值"行保留为指令,重试时可整体丢弃
*/

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::error::{EngineError, EngineResult};
use crate::data::personal::Gender;
use crate::data::species::{FormId, SpeciesId};
use crate::request::{Filter, Instruction, NormalizedRequest, ShinyRequest};

/// 本地化名称表 - 外部数据代码实现
pub trait SpeciesNames {
    fn species_id(&self, name: &str) -> Option<SpeciesId>;
    fn form_id(&self, species: SpeciesId, form_name: &str) -> Option<FormId>;
    fn move_id(&self, name: &str) -> Option<u16>;
    fn item_id(&self, name: &str) -> Option<u16>;
    fn nature_id(&self, name: &str) -> Option<u8>;
    fn ability_slot(&self, species: SpeciesId, form: FormId, name: &str) -> Option<u8>;
}

/// 能力顺序:HP/Atk/Def/SpA/SpD/Spe
const STAT_NAMES: [&str; 6] = ["HP", "Atk", "Def", "SpA", "SpD", "Spe"];

/// 解析扩展请求文本为规范化请求
pub fn parse_request(text: &str, names: &dyn SpeciesNames) -> EngineResult<NormalizedRequest> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let header = lines
        .next()
        .ok_or_else(|| EngineError::InvalidRequest("empty request".to_string()))?;

    let mut request = parse_header(header, names)?;

    for line in lines {
        if let Some(rest) = line.strip_prefix("- ") {
            let move_id = names.move_id(rest.trim()).ok_or_else(|| {
                EngineError::InvalidRequest(format!("unknown move: {}", rest.trim()))
            })?;
            if request.moves.len() < 4 {
                request.moves.push(move_id);
            }
            continue;
        }

        if let Some(instruction) = line.strip_prefix('.') {
            if let Some((prop, value)) = instruction.split_once('=') {
                request.instructions.push(Instruction {
                    property: prop.to_string(),
                    value: value.to_string(),
                });
                continue;
            }
        }

        if line.starts_with('=') || line.starts_with('!') {
            let required = line.starts_with('=');
            if let Some((prop, value)) = line[1..].split_once('=') {
                request.filters.push(Filter {
                    property: prop.to_string(),
                    value: value.to_string(),
                    required,
                });
                continue;
            }
        }

        if let Some(nature) = line.strip_suffix(" Nature") {
            request.criteria.nature = names.nature_id(nature.trim());
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(EngineError::InvalidRequest(format!(
                "unparseable line: {}",
                line
            )));
        };
        let value = value.trim();

        match key.trim() {
            "Level" => {
                request.level = value.parse().map_err(|_| {
                    EngineError::InvalidRequest(format!("bad level: {}", value))
                })?;
            }
            "Shiny" => {
                request.criteria.shiny = match value {
                    "Yes" => ShinyRequest::Always,
                    "No" => ShinyRequest::Never,
                    "Star" => ShinyRequest::AlwaysStar,
                    "Square" => ShinyRequest::AlwaysSquare,
                    _ => ShinyRequest::Random,
                };
            }
            "Gigantamax" => request.can_gigantamax = value == "Yes",
            "Tera Type" => request.tera_type = Some(value.to_string()),
            "Dynamax Level" => {
                request.dynamax_level = value.parse().ok();
            }
            "Ability" => {
                request.criteria.ability_slot =
                    names.ability_slot(request.species, request.form, value);
            }
            "EVs" => parse_spread(value, |slot, amount| {
                request.evs[slot] = amount.min(252) as u8;
            })?,
            "IVs" => parse_spread(value, |slot, amount| {
                request.criteria.ivs[slot] = amount.min(31) as i8;
            })?,
            "OT" => request.trainer.ot_name = Some(value.to_string()),
            "TID" => request.trainer.tid = value.parse().ok(),
            "SID" => request.trainer.sid = value.parse().ok(),
            "OTGender" => {
                request.trainer.gender = Some(match value {
                    "Female" | "F" => Gender::Female,
                    _ => Gender::Male,
                });
            }
            "Language" => request.trainer.language = language_id(value),
            // 未知键值行进入指令旁路,宽松重试时一并丢弃
            other => request.instructions.push(Instruction {
                property: other.to_string(),
                value: value.to_string(),
            }),
        }
    }

    Ok(request)
}

/// 首行:`Species-Form (G) @ Item`
fn parse_header(header: &str, names: &dyn SpeciesNames) -> EngineResult<NormalizedRequest> {
    let (name_part, item_part) = match header.split_once(" @ ") {
        Some((name, item)) => (name.trim(), Some(item.trim())),
        None => (header, None),
    };

    let (name_part, gender) = match name_part {
        n if n.ends_with("(M)") => (n[..n.len() - 3].trim(), Some(Gender::Male)),
        n if n.ends_with("(F)") => (n[..n.len() - 3].trim(), Some(Gender::Female)),
        n => (n, None),
    };

    let (species, form) = resolve_species_form(name_part, names)?;

    let mut request = NormalizedRequest::simple(species, form);
    request.gender = gender;
    if let Some(item) = item_part {
        request.held_item = names.item_id(item);
    }
    Ok(request)
}

/// 先按全名查物种,失败则在每个'-'处切分尝试"物种-形态"
fn resolve_species_form(
    name: &str,
    names: &dyn SpeciesNames,
) -> EngineResult<(SpeciesId, FormId)> {
    if let Some(species) = names.species_id(name) {
        return Ok((species, 0));
    }

    for (idx, _) in name.match_indices('-') {
        let (species_name, form_name) = (&name[..idx], &name[idx + 1..]);
        if let Some(species) = names.species_id(species_name) {
            if let Some(form) = names.form_id(species, form_name) {
                return Ok((species, form));
            }
        }
    }

    Err(EngineError::InvalidRequest(format!(
        "unknown species: {}",
        name
    )))
}

fn parse_spread(value: &str, mut assign: impl FnMut(usize, u32)) -> EngineResult<()> {
    lazy_static! {
        static ref STAT_REGEX: Regex =
            Regex::new(r"(?i)^(\d+)\s+(HP|Atk|Def|SpA|SpD|Spe)$").unwrap();
    }
    for chunk in value.split('/') {
        let chunk = chunk.trim();
        let caps = STAT_REGEX.captures(chunk).ok_or_else(|| {
            EngineError::InvalidRequest(format!("bad stat spread entry: {}", chunk))
        })?;
        let amount: u32 = caps[1].parse().unwrap_or(0);
        let stat = &caps[2];
        let slot = STAT_NAMES
            .iter()
            .position(|s| s.eq_ignore_ascii_case(stat))
            .ok_or_else(|| {
                EngineError::InvalidRequest(format!("unknown stat: {}", stat))
            })?;
        assign(slot, amount);
    }
    Ok(())
}

fn language_id(name: &str) -> Option<u8> {
    // 与存档语言编号一致
    match name {
        "Japanese" => Some(1),
        "English" => Some(2),
        "French" => Some(3),
        "Italian" => Some(4),
        "German" => Some(5),
        "Spanish" => Some(7),
        "Korean" => Some(8),
        "ChineseS" => Some(9),
        "ChineseT" => Some(10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::IV_DONT_CARE;

    struct MockNames;

    impl SpeciesNames for MockNames {
        fn species_id(&self, name: &str) -> Option<SpeciesId> {
            match name {
                "Pikachu" => Some(25),
                "Ho-Oh" => Some(250),
                "Giratina" => Some(487),
                _ => None,
            }
        }

        fn form_id(&self, species: SpeciesId, form_name: &str) -> Option<FormId> {
            match (species, form_name) {
                (25, "Partner") => Some(8),
                (487, "Origin") => Some(1),
                _ => None,
            }
        }

        fn move_id(&self, name: &str) -> Option<u16> {
            match name {
                "Thunderbolt" => Some(85),
                "Surf" => Some(57),
                _ => None,
            }
        }

        fn item_id(&self, name: &str) -> Option<u16> {
            (name == "Light Ball").then_some(236)
        }

        fn nature_id(&self, name: &str) -> Option<u8> {
            (name == "Timid").then_some(10)
        }

        fn ability_slot(&self, _species: SpeciesId, _form: FormId, name: &str) -> Option<u8> {
            (name == "Static").then_some(0)
        }
    }

    #[test]
    fn test_parse_full_request() {
        let text = "Pikachu-Partner (M) @ Light Ball\n\
                    Level: 25\n\
                    Shiny: Yes\n\
                    Ability: Static\n\
                    Timid Nature\n\
                    EVs: 252 SpA / 4 SpD / 252 Spe\n\
                    IVs: 0 Atk\n\
                    - Thunderbolt\n\
                    - Surf\n";
        let request = parse_request(text, &MockNames).unwrap();
        assert_eq!(request.species, 25);
        assert_eq!(request.form, 8);
        assert_eq!(request.gender, Some(Gender::Male));
        assert_eq!(request.held_item, Some(236));
        assert_eq!(request.level, 25);
        assert_eq!(request.criteria.shiny, ShinyRequest::Always);
        assert_eq!(request.criteria.nature, Some(10));
        assert_eq!(request.evs, [0, 0, 0, 252, 4, 252]);
        assert_eq!(request.criteria.ivs[1], 0);
        assert_eq!(request.criteria.ivs[0], IV_DONT_CARE);
        assert_eq!(request.moves, vec![85, 57]);
    }

    #[test]
    fn test_hyphenated_species_name() {
        let request = parse_request("Ho-Oh", &MockNames).unwrap();
        assert_eq!(request.species, 250);
        assert_eq!(request.form, 0);
    }

    #[test]
    fn test_form_resolution() {
        let request = parse_request("Giratina-Origin", &MockNames).unwrap();
        assert_eq!(request.species, 487);
        assert_eq!(request.form, 1);
    }

    #[test]
    fn test_trainer_override_side_channel() {
        let text = "Pikachu\nOT: Red\nTID: 123456\nSID: 7890\nOTGender: Female\nLanguage: English";
        let request = parse_request(text, &MockNames).unwrap();
        assert_eq!(request.trainer.ot_name.as_deref(), Some("Red"));
        assert_eq!(request.trainer.tid, Some(123456));
        assert_eq!(request.trainer.sid, Some(7890));
        assert_eq!(request.trainer.gender, Some(Gender::Female));
        assert_eq!(request.trainer.language, Some(2));
    }

    #[test]
    fn test_instruction_and_filter_lines() {
        let text = "Pikachu\n.MetDate=20230225\n=Ball=Poke\n!Ribbon=Mightiest";
        let request = parse_request(text, &MockNames).unwrap();
        assert_eq!(request.instructions.len(), 1);
        assert_eq!(request.filters.len(), 2);
        assert!(request.filters[0].required);
        assert!(!request.filters[1].required);
    }

    #[test]
    fn test_unknown_species_is_error() {
        assert!(parse_request("Missingno", &MockNames).is_err());
    }
}
