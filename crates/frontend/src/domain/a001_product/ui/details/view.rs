use contracts::domain::a001_product::aggregate::ProductId;
use contracts::shared::cart::{buy_now, CartActions};
use contracts::shared::page_view::{
    CommentView, ProductPageView, ProductView, INVITATION_TEXT, LOADING_TEXT, NOT_FOUND_TEXT,
};
use contracts::shared::rich_text::TextBlock;
use contracts::usecases::u001_comment_submission::ACK_WINDOW_MS;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use thaw::*;

use super::view_model::{LoadState, ProductDetailsVm};
use crate::domain::a002_comment::ui::form::{CommentFormView, CommentFormVm};
use crate::shared::cart::use_cart;

/// Страница товара `/app/product/:slug`
#[component]
pub fn ProductDetailsPage() -> impl IntoView {
    let params = use_params_map();
    let vm = ProductDetailsVm::new();

    // Маршрут мог не быть отрисован заранее: данные грузятся по запросу
    Effect::new(move |_| {
        let slug = params.with(|p| p.get("slug")).unwrap_or_default();
        vm.load(slug);
    });

    view! {
        <div class="product-page">
            {move || match vm.state.get() {
                LoadState::Loading => view! {
                    <div class="product-page__loading">
                        <Spinner />
                        <p>{LOADING_TEXT}</p>
                    </div>
                }
                    .into_any(),
                LoadState::NotFound => view! { <ProductNotFound /> }.into_any(),
                LoadState::Failed(message) => view! {
                    <p class="product-page__error">{message}</p>
                }
                    .into_any(),
                LoadState::Ready(_) => view! { <ProductDetails vm=vm /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn ProductNotFound() -> impl IntoView {
    set_document_title(NOT_FOUND_TEXT);
    view! {
        <div class="product-page__not-found">
            <h1>{NOT_FOUND_TEXT}</h1>
            <a href="/">"Back to all products"</a>
        </div>
    }
}

#[component]
fn ProductDetails(vm: ProductDetailsVm) -> impl IntoView {
    let cart = use_cart();
    let qty = cart.qty_signal();
    let comment_vm = CommentFormVm::new(vm.ack_window_ms().unwrap_or(ACK_WINDOW_MS));

    let details = Memo::new(move |_| {
        let quantity = qty.get();
        match comment_vm.form.with(|form| vm.page_view(quantity, form)) {
            Some(ProductPageView::Product(view)) => Some(*view),
            _ => None,
        }
    });

    // Товар для корзины (снимок на момент загрузки)
    let product = StoredValue::new(vm.page_data().and_then(|page| page.product().cloned()));
    let product_id = product
        .with_value(|p| p.as_ref().map(|p| p.id.clone()))
        .unwrap_or_else(|| ProductId::new(""));

    Effect::new(move |_| {
        if let Some(view) = details.get() {
            set_document_title(&view.title);
        }
    });

    let field = move |f: fn(&ProductView) -> String| {
        move || details.with(|d| d.as_ref().map(f).unwrap_or_default())
    };

    let add_to_cart = move |_: leptos::ev::MouseEvent| {
        product.with_value(|p| {
            if let Some(p) = p {
                cart.add_to_cart(p, cart.qty());
            }
        });
    };
    let buy = move |_: leptos::ev::MouseEvent| {
        product.with_value(|p| {
            if let Some(p) = p {
                buy_now(&cart, p);
            }
        });
    };

    view! {
        <div class="product-detail-container">
            <div class="product-detail-gallery">
                <div class="image-container">
                    <img
                        class="product-detail-image"
                        src=move || details.with(|d| d.as_ref().map(|d| d.main_image.url.clone()).unwrap_or_default())
                        alt=move || details.with(|d| d.as_ref().map(|d| d.main_image.alt.clone()).unwrap_or_default())
                    />
                </div>
                <div class="small-images-container">
                    {move || {
                        details
                            .with(|d| d.as_ref().map(|d| d.thumbnails.clone()).unwrap_or_default())
                            .into_iter()
                            .map(|thumb| {
                                let index = thumb.index;
                                let class = if thumb.active {
                                    "small-image selected-image"
                                } else {
                                    "small-image"
                                };
                                view! {
                                    <img
                                        class=class
                                        src=thumb.url
                                        alt=thumb.alt
                                        on:mouseenter=move |_| vm.selected_image.set(index)
                                    />
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </div>

            <div class="product-detail-desc">
                <h1>{field(|d| d.name.clone())}</h1>
                <div class="product-detail-text">
                    {move || {
                        details
                            .with(|d| d.as_ref().map(|d| d.description.clone()).unwrap_or_default())
                            .into_iter()
                            .map(text_block)
                            .collect_view()
                    }}
                </div>
                <p class="price">{field(|d| d.price_label.clone())}</p>

                <div class="quantity">
                    <h3>"Quantity:"</h3>
                    <p class="quantity-desc">
                        <span class="minus" on:click=move |_| cart.decrease_quantity()>"-"</span>
                        <span class="num">{move || qty.get()}</span>
                        <span class="plus" on:click=move |_| cart.increase_quantity()>"+"</span>
                    </p>
                </div>

                <Flex gap=FlexGap::Medium>
                    <Button appearance=ButtonAppearance::Secondary on_click=add_to_cart>
                        "Add to Cart"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=buy>
                        "Buy Now"
                    </Button>
                </Flex>
            </div>
        </div>

        <section class="comments">
            <h2>{move || format!("Comments ({})", details.with(|d| d.as_ref().map(|d| d.comment_count).unwrap_or(0)))}</h2>
            <Show when=move || details.with(|d| d.as_ref().is_some_and(|d| d.show_invitation))>
                <p class="comments__invitation">{INVITATION_TEXT}</p>
            </Show>
            {move || {
                details
                    .with(|d| d.as_ref().map(|d| d.comments.clone()).unwrap_or_default())
                    .into_iter()
                    .map(comment_entry)
                    .collect_view()
            }}
            {move || details.with(|d| d.as_ref().and_then(|d| d.banner.clone())).map(|banner| view! {
                <p class="comment-form__ack">{banner}</p>
            })}
            {move || details.with(|d| d.as_ref().and_then(|d| d.submission_error.clone())).map(|message| view! {
                <p class="comment-form__error">{message}</p>
            })}
            <CommentFormView vm=comment_vm product_id=product_id />
        </section>
    }
}

fn text_block(block: TextBlock) -> impl IntoView {
    match block.style.as_str() {
        "h1" | "h2" => view! { <h2>{block.text}</h2> }.into_any(),
        "h3" | "h4" | "h5" | "h6" => view! { <h4>{block.text}</h4> }.into_any(),
        "blockquote" => view! { <blockquote>{block.text}</blockquote> }.into_any(),
        _ if block.list_item.is_some() => view! { <li>{block.text}</li> }.into_any(),
        _ => view! { <p>{block.text}</p> }.into_any(),
    }
}

fn comment_entry(comment: CommentView) -> impl IntoView {
    let link = comment.product_href.clone().map(|href| {
        let image = comment
            .product_image
            .clone()
            .map(|image| view! { <img src=image.url alt=image.alt /> });
        let name = comment.product_name.clone().unwrap_or_default();
        view! {
            <a class="comment__product" href=href>
                {image}
                <span>{format!("You commented on {}", name)}</span>
            </a>
        }
    });

    view! {
        <article class="comment">
            <h3>{comment.author}</h3>
            <p>{comment.body}</p>
            {link}
        </article>
    }
}

fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}
