use contracts::shared::page::{PageData, ProductPagePayload};
use contracts::shared::page_view::{PageUiState, ProductPageView};
use contracts::usecases::u001_comment_submission::CommentForm;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_product::api;

/// Состояние загрузки страницы
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    NotFound,
    Ready(Box<ProductPagePayload>),
    Failed(String),
}

/// ViewModel страницы товара
#[derive(Clone, Copy)]
pub struct ProductDetailsVm {
    pub state: RwSignal<LoadState>,
    pub selected_image: RwSignal<usize>,
}

impl ProductDetailsVm {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(LoadState::Loading),
            selected_image: RwSignal::new(0),
        }
    }

    /// Загрузить страницу по slug (маршрут без заранее отрисованных данных)
    pub fn load(&self, slug: String) {
        let this = *self;
        this.state.set(LoadState::Loading);
        this.selected_image.set(0);

        spawn_local(async move {
            let next = match api::fetch_product_page(&slug).await {
                Ok(Some(payload)) if !payload.page.is_not_found() => {
                    LoadState::Ready(Box::new(payload))
                }
                Ok(_) => LoadState::NotFound,
                Err(e) => {
                    log::error!("Failed to load product '{}': {}", slug, e);
                    LoadState::Failed(e)
                }
            };
            this.state.try_set(next);
        });
    }

    /// Модель отображения для текущего состояния (вместе с состоянием формы)
    pub fn page_view(&self, quantity: u32, form: &CommentForm) -> Option<ProductPageView> {
        let selected = self.selected_image.get();
        self.state.with(|state| match state {
            LoadState::Ready(payload) => {
                let ui = PageUiState {
                    selected_image: selected,
                    quantity,
                    ..PageUiState::default()
                }
                .with_form(form);
                Some(ProductPageView::build(
                    &payload.page,
                    &ui,
                    &payload.media,
                    &payload.store_name,
                ))
            }
            _ => None,
        })
    }

    pub fn page_data(&self) -> Option<PageData> {
        self.state.with_untracked(|state| match state {
            LoadState::Ready(payload) => Some(payload.page.clone()),
            _ => None,
        })
    }

    pub fn ack_window_ms(&self) -> Option<u64> {
        self.state.with_untracked(|state| match state {
            LoadState::Ready(payload) => Some(payload.ack_window_ms),
            _ => None,
        })
    }
}

impl Default for ProductDetailsVm {
    fn default() -> Self {
        Self::new()
    }
}
