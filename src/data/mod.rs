// 静态数据模块 - 版本模型、种族表接口与特判表
// 开发心理：表内容属于外部数据，引擎只定义查询接口和小型闭集

pub mod events;
pub mod personal;
pub mod species;
pub mod tables;
pub mod version;

pub use events::{DateRange, EventCalendar};
pub use personal::{Gender, InMemoryPersonalTable, PersonalInfo, PersonalTable};
pub use version::{EntityContext, GameVersion, VersionGroup};
