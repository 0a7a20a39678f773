//! Корзина как внешняя возможность страницы товара.
//!
//! Страница не знает, как устроена корзина: она получает объект с
//! фиксированным набором операций и только вызывает их.

use serde::{Deserialize, Serialize};

use crate::domain::a001_product::aggregate::{Product, ProductId};

/// Минимальное значение счётчика количества
pub const MIN_QTY: u32 = 1;

/// Набор операций корзины, доступных странице товара
pub trait CartActions: Send + Sync {
    /// Текущее выбранное количество
    fn qty(&self) -> u32;

    fn increase_quantity(&self);

    /// Уменьшить количество, не опускаясь ниже `MIN_QTY`
    fn decrease_quantity(&self);

    /// Синхронно добавить товар в корзину
    fn add_to_cart(&self, product: &Product, quantity: u32);

    fn set_show_cart(&self, show: bool);
}

/// "Купить сейчас": добавить текущее количество и сразу открыть корзину
pub fn buy_now(cart: &dyn CartActions, product: &Product) {
    let quantity = cart.qty();
    cart.add_to_cart(product, quantity);
    cart.set_show_cart(true);
}

/// Строка корзины
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

/// Состояние корзины без привязки к UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    pub items: Vec<CartItem>,
    pub qty: u32,
    pub show_cart: bool,
}

impl Default for CartState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            qty: MIN_QTY,
            show_cart: false,
        }
    }
}

impl CartState {
    pub fn increase(&mut self) {
        self.qty = self.qty.saturating_add(1);
    }

    pub fn decrease(&mut self) {
        self.qty = self.qty.saturating_sub(1).max(MIN_QTY);
    }

    /// Добавить товар; строки одного товара объединяются
    pub fn add(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem {
                product_id: product.id.clone(),
                name: product.display_name(),
                price: product.new_price,
                quantity,
            }),
        }
    }

    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.price * f64::from(i.quantity))
            .sum()
    }
}
