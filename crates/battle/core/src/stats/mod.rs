//! Param model and effective stat resolution.
pub mod bonus;
pub mod params;
pub mod resolver;

pub use bonus::{Bonus, BonusStack};
pub use params::{ParamId, ParamTable, StatKey, XParamId, XParamTable};
pub use resolver::StatResolver;
