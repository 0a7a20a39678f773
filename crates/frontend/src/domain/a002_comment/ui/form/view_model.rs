use contracts::domain::a001_product::aggregate::ProductId;
use contracts::usecases::u001_comment_submission::{AckTicket, CommentForm, SubmitRejected};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a002_comment::api;

/// ViewModel формы комментария.
///
/// Поля ввода: отдельные RwSignal для привязки THAW; состояние отправки,
/// баннер и ошибки хранятся в `CommentForm` и попадают на страницу через
/// модель отображения. Таймер баннера живёт не дольше представления.
#[derive(Clone, Copy)]
pub struct CommentFormVm {
    pub username: RwSignal<String>,
    pub email: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub form: RwSignal<CommentForm>,
    timer: StoredValue<Option<Timeout>, LocalStorage>,
}

impl CommentFormVm {
    pub fn new(ack_window_ms: u64) -> Self {
        let timer = StoredValue::new_local(None::<Timeout>);

        // Снятие представления отменяет ожидающий таймер
        on_cleanup(move || {
            timer.try_update_value(|slot| slot.take());
        });

        Self {
            username: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            form: RwSignal::new(CommentForm::new(ack_window_ms)),
            timer,
        }
    }

    // === Derived state ===

    pub fn is_submitting(&self) -> bool {
        self.form.with(|f| f.is_submitting())
    }

    // === Commands ===

    /// Отправить комментарий к товару
    pub fn submit(&self, product_id: ProductId) {
        let username = self.username.get_untracked();
        let email = self.email.get_untracked();
        let comment = self.comment.get_untracked();

        let started = self.form.try_update(|form| {
            form.set_username(username);
            form.set_email(email);
            form.set_comment(comment);
            form.begin_submit(&product_id)
        });

        let request = match started {
            Some(Ok(request)) => request,
            Some(Err(SubmitRejected::InFlight)) | None => return,
            Some(Err(SubmitRejected::Invalid(e))) => {
                log::debug!("Comment not sent: {}", e);
                return;
            }
        };

        let this = *self;
        spawn_local(async move {
            let outcome = api::post_comment(&request).await;
            let ticket = this
                .form
                .try_update(|form| form.finish_submit(outcome))
                .flatten();

            if let Some(ticket) = ticket {
                // Форма очистила текст комментария; имя и e-mail остаются
                if let Some(cleared) = this.form.try_with_untracked(|f| f.draft.comment.clone()) {
                    this.comment.try_set(cleared);
                }
                this.schedule_expire(ticket);
            }
        });
    }

    /// Скрыть баннер через окно подтверждения.
    ///
    /// Новый таймер заменяет предыдущий; старый при этом отменяется.
    fn schedule_expire(&self, ticket: AckTicket) {
        let form = self.form;
        let delay = u32::try_from(ticket.delay_ms).unwrap_or(u32::MAX);
        let timeout = Timeout::new(delay, move || {
            form.try_update(|f| f.expire(ticket));
        });
        self.timer.try_update_value(|slot| *slot = Some(timeout));
    }
}
