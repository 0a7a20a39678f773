//! Общие типы для backend и frontend страницы товара.

pub mod domain;
pub mod shared;
pub mod usecases;
