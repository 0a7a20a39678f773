//! Форма комментария
//!
//! - view_model.rs: состояние формы (машина состояний из contracts) и команды
//! - view.rs: Leptos-компонент

mod view;
mod view_model;

pub use view::CommentFormView;
pub use view_model::CommentFormVm;
