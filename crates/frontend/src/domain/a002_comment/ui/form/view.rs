use contracts::domain::a001_product::aggregate::ProductId;
use leptos::prelude::*;
use thaw::*;

use super::view_model::CommentFormVm;

/// Поля формы и кнопка отправки; баннер и ошибки рисует страница товара
#[component]
pub fn CommentFormView(vm: CommentFormVm, product_id: ProductId) -> impl IntoView {
    let product_id = StoredValue::new(product_id);

    view! {
        <section class="comment-form">
            <h3>"Leave a comment"</h3>
            <Flex vertical=true gap=FlexGap::Medium>
                <Input value=vm.username placeholder="Name" />
                <Input value=vm.email placeholder="E-mail" />
                <Textarea value=vm.comment placeholder="Comment" attr:rows=4 />
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || vm.is_submitting())
                    on_click=move |_| vm.submit(product_id.get_value())
                >
                    {move || if vm.is_submitting() { "Sending..." } else { "Submit" }}
                </Button>
            </Flex>
        </section>
    }
}
