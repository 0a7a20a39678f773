mod context;
mod panel;

pub use context::{use_cart, CartContext};
pub use panel::CartPanel;
