pub mod cart;
pub mod media;
pub mod page;
pub mod page_view;
pub mod rich_text;
