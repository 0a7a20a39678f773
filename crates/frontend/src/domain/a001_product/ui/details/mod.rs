//! Product Details UI Module
//!
//! - view_model.rs: загрузка данных страницы, выбор изображения
//! - view.rs: Leptos-компоненты (галерея, описание, корзина, комментарии)

mod view;
mod view_model;

pub use view::ProductDetailsPage;
pub use view_model::ProductDetailsVm;
