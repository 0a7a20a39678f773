pub mod a001_product;
pub mod a002_comment;
pub mod common;
pub mod pages;
