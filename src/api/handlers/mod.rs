pub mod health;
pub mod kind;
pub mod rules;
