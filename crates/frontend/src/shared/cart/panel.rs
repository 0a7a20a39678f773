use contracts::shared::cart::CartActions;
use contracts::shared::page_view::format_price;
use leptos::prelude::*;
use thaw::*;

use super::use_cart;

/// Выезжающая панель корзины
#[component]
pub fn CartPanel() -> impl IntoView {
    let cart = use_cart();

    view! {
        <Show when=move || cart.show_cart()>
            <aside class="cart-panel">
                <div class="cart-panel__header">
                    <h2>"Your Cart"</h2>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| cart.set_show_cart(false)
                    >
                        "Close"
                    </Button>
                </div>
                {move || {
                    let state = cart.state.get();
                    if state.items.is_empty() {
                        view! { <p class="cart-panel__empty">"Your shopping bag is empty"</p> }
                            .into_any()
                    } else {
                        view! {
                            <div class="cart-panel__body">
                            <ul class="cart-panel__items">
                                {state
                                    .items
                                    .iter()
                                    .map(|item| {
                                        view! {
                                            <li>
                                                <span class="name">{item.name.clone()}</span>
                                                <span class="qty">{format!("x{}", item.quantity)}</span>
                                                <span class="price">{format_price(item.price)}</span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                            <p class="cart-panel__total">
                                {format!(
                                    "Subtotal ({} items): {}",
                                    state.total_quantity(),
                                    format_price(state.total_price()),
                                )}
                            </p>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </aside>
        </Show>
    }
}
