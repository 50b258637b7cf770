pub mod artifacts;
pub mod recommend;
pub mod rules;
