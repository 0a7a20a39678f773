use contracts::domain::a001_product::aggregate::Product;
use contracts::shared::cart::{CartActions, CartState};
use leptos::prelude::*;

/// Корзина приложения: реактивная обёртка над `CartState`
#[derive(Clone, Copy)]
pub struct CartContext {
    pub state: RwSignal<CartState>,
}

impl CartContext {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(CartState::default()),
        }
    }

    /// Реактивное количество для отображения
    pub fn qty_signal(&self) -> Signal<u32> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.qty))
    }

    pub fn show_cart(&self) -> bool {
        self.state.with(|s| s.show_cart)
    }
}

impl Default for CartContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CartActions for CartContext {
    fn qty(&self) -> u32 {
        self.state.with_untracked(|s| s.qty)
    }

    fn increase_quantity(&self) {
        self.state.update(|s| s.increase());
    }

    fn decrease_quantity(&self) {
        self.state.update(|s| s.decrease());
    }

    fn add_to_cart(&self, product: &Product, quantity: u32) {
        self.state.update(|s| s.add(product, quantity));
        log::debug!("Added {} x {} to cart", quantity, product.id);
    }

    fn set_show_cart(&self, show: bool) {
        self.state.update(|s| s.show_cart = show);
    }
}

pub fn use_cart() -> CartContext {
    use_context::<CartContext>().expect("CartContext not found. Provide it in App.")
}
