use smartstring::{LazyCompact, SmartString};

pub mod document;
pub mod host;
pub mod movement;
pub mod selection;
pub mod snippet;
pub mod transaction;

pub type Tendril = SmartString<LazyCompact>;
