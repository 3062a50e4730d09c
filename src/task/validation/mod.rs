//! Validation rules and the rule-based validator service.

pub mod rules;
mod service;

pub use service::RuleBasedTaskValidator;
