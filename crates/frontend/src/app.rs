use crate::domain::a001_product::ui::details::ProductDetailsPage;
use crate::shared::cart::{CartContext, CartPanel};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    // Корзина: внешняя для страницы товара возможность, доступная через context
    provide_context(CartContext::new());

    view! {
        <Router>
            <CartPanel />
            <Routes fallback=|| view! { <p class="not-found">"Page not found"</p> }>
                <Route path=path!("/app/product/:slug") view=ProductDetailsPage />
            </Routes>
        </Router>
    }
}
