//! Конвейер отправки комментария: состояние формы для одной страницы.
//!
//! ```text
//! Editing --begin_submit--> Submitting --finish_submit(ok)--> Acknowledged
//!                                      \--finish_submit(err)-> Failed
//! ```
//!
//! После подтверждения баннер виден `ack_window_ms` миллисекунд и затем
//! скрывается по билету таймера. Ветка комментариев после отправки не
//! перечитывается.

use serde::{Deserialize, Serialize};

use crate::domain::a001_product::aggregate::ProductId;
use crate::domain::a002_comment::aggregate::{
    CommentDraft, CreateCommentRequest, ValidationError,
};

/// Окно показа баннера подтверждения, мс
pub const ACK_WINDOW_MS: u64 = 5_000;

pub const ACK_MESSAGE: &str = "Refresh after a minute to see your comment.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionPhase {
    Editing,
    Submitting,
    Acknowledged,
    Failed(String),
}

/// Почему отправка не началась (запрос не отправляется)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("A comment is already being submitted")]
    InFlight,
}

/// Результат единственного запроса к `POST /api/comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { status: u16 },
    TransportFailed(String),
}

impl SubmitOutcome {
    /// Успех определяется по реальному HTTP-статусу ответа
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            SubmitOutcome::Accepted
        } else {
            SubmitOutcome::Rejected { status }
        }
    }
}

/// Билет таймера баннера.
///
/// Таймер, запланированный для более раннего подтверждения, не может
/// скрыть более новый баннер.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckTicket {
    generation: u64,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentForm {
    pub draft: CommentDraft,
    phase: SubmissionPhase,
    /// Поколение видимого баннера
    banner: Option<u64>,
    generation: u64,
    ack_window_ms: u64,
    /// Последняя ошибка проверки полей (запрос не отправлялся)
    validation_error: Option<String>,
}

impl Default for CommentForm {
    fn default() -> Self {
        Self::new(ACK_WINDOW_MS)
    }
}

impl CommentForm {
    pub fn new(ack_window_ms: u64) -> Self {
        Self {
            draft: CommentDraft::default(),
            phase: SubmissionPhase::Editing,
            banner: None,
            generation: 0,
            ack_window_ms,
            validation_error: None,
        }
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    pub fn banner_visible(&self) -> bool {
        self.banner.is_some()
    }

    /// Ошибка для показа под формой: неудачная отправка или незаполненное поле
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            SubmissionPhase::Failed(message) => Some(message),
            _ => self.validation_error.as_deref(),
        }
    }

    pub fn set_username(&mut self, value: impl Into<String>) {
        self.draft.username = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.draft.email = value.into();
    }

    pub fn set_comment(&mut self, value: impl Into<String>) {
        self.draft.comment = value.into();
    }

    /// Начать отправку.
    ///
    /// Пустое поле или уже идущая отправка: запрос не формируется.
    pub fn begin_submit(
        &mut self,
        product_id: &ProductId,
    ) -> Result<CreateCommentRequest, SubmitRejected> {
        if self.is_submitting() {
            return Err(SubmitRejected::InFlight);
        }
        // Ошибка прошлой отправки больше не актуальна
        if matches!(self.phase, SubmissionPhase::Failed(_)) {
            self.phase = SubmissionPhase::Editing;
        }
        if let Err(e) = self.draft.validate() {
            self.validation_error = Some(e.to_string());
            return Err(e.into());
        }

        self.validation_error = None;
        self.phase = SubmissionPhase::Submitting;
        Ok(self.draft.to_request(product_id))
    }

    /// Завершить отправку.
    ///
    /// При успехе возвращает билет, по которому через `delay_ms` нужно
    /// вызвать [`CommentForm::expire`].
    pub fn finish_submit(&mut self, outcome: SubmitOutcome) -> Option<AckTicket> {
        if !self.is_submitting() {
            return None;
        }

        match outcome {
            SubmitOutcome::Accepted => {
                self.generation += 1;
                self.phase = SubmissionPhase::Acknowledged;
                self.draft.comment.clear();
                self.banner = Some(self.generation);
                Some(AckTicket {
                    generation: self.generation,
                    delay_ms: self.ack_window_ms,
                })
            }
            SubmitOutcome::Rejected { status } => {
                self.phase =
                    SubmissionPhase::Failed(format!("Comment was not accepted (HTTP {})", status));
                None
            }
            SubmitOutcome::TransportFailed(reason) => {
                self.phase =
                    SubmissionPhase::Failed(format!("Comment could not be sent: {}", reason));
                None
            }
        }
    }

    /// Сработал таймер баннера
    pub fn expire(&mut self, ticket: AckTicket) {
        if self.banner == Some(ticket.generation) {
            self.banner = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> CommentForm {
        let mut form = CommentForm::default();
        form.set_username("Ada");
        form.set_email("a@x.com");
        form.set_comment("Great!");
        form
    }

    fn p1() -> ProductId {
        ProductId::new("p1")
    }

    #[test]
    fn test_filled_form_produces_exactly_one_request() {
        let mut form = filled_form();
        let request = form.begin_submit(&p1()).unwrap();

        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"_id":"p1","username":"Ada","email":"a@x.com","comment":"Great!"}"#
        );
        assert!(form.is_submitting());
    }

    #[test]
    fn test_empty_field_sends_nothing() {
        for field in ["username", "email", "comment"] {
            let mut form = filled_form();
            match field {
                "username" => form.set_username(""),
                "email" => form.set_email(""),
                _ => form.set_comment(""),
            }

            let result = form.begin_submit(&p1());
            assert!(matches!(result, Err(SubmitRejected::Invalid(_))), "{field}");
            assert_eq!(form.phase(), &SubmissionPhase::Editing);
        }
    }

    #[test]
    fn test_busy_guard_blocks_second_submission() {
        let mut form = filled_form();
        assert!(form.begin_submit(&p1()).is_ok());
        assert_eq!(form.begin_submit(&p1()), Err(SubmitRejected::InFlight));
    }

    #[test]
    fn test_banner_window_comes_from_form_settings() {
        let mut form = filled_form();
        form.begin_submit(&p1()).unwrap();
        let ticket = form.finish_submit(SubmitOutcome::Accepted).unwrap();
        assert_eq!(ticket.delay_ms, ACK_WINDOW_MS);

        let mut short = CommentForm::new(250);
        short.set_username("Ada");
        short.set_email("a@x.com");
        short.set_comment("Hi");
        short.begin_submit(&p1()).unwrap();
        assert_eq!(short.finish_submit(SubmitOutcome::Accepted).unwrap().delay_ms, 250);
    }

    #[test]
    fn test_expire_hides_banner_for_matching_ticket() {
        let mut form = filled_form();
        form.begin_submit(&p1()).unwrap();
        let ticket = form.finish_submit(SubmitOutcome::Accepted).unwrap();
        assert!(form.banner_visible());
        assert_eq!(form.phase(), &SubmissionPhase::Acknowledged);

        form.expire(ticket);
        assert!(!form.banner_visible());

        // повторное срабатывание ничего не меняет
        form.expire(ticket);
        assert!(!form.banner_visible());
    }

    #[test]
    fn test_stale_ticket_does_not_hide_newer_banner() {
        let mut form = filled_form();
        form.begin_submit(&p1()).unwrap();
        let first = form.finish_submit(SubmitOutcome::Accepted).unwrap();

        form.set_comment("Second");
        form.begin_submit(&p1()).unwrap();
        let second = form.finish_submit(SubmitOutcome::Accepted).unwrap();

        form.expire(first);
        assert!(form.banner_visible());
        form.expire(second);
        assert!(!form.banner_visible());
    }

    #[test]
    fn test_success_clears_comment_and_keeps_author() {
        let mut form = filled_form();
        form.begin_submit(&p1()).unwrap();
        form.finish_submit(SubmitOutcome::Accepted);

        assert_eq!(form.draft.comment, "");
        assert_eq!(form.draft.username, "Ada");
        assert_eq!(form.draft.email, "a@x.com");
    }

    #[test]
    fn test_non_success_status_surfaces_error_without_banner() {
        let mut form = filled_form();
        form.begin_submit(&p1()).unwrap();
        let ticket = form.finish_submit(SubmitOutcome::from_status(500));

        assert!(ticket.is_none());
        assert!(!form.banner_visible());
        assert_eq!(form.error_message(), Some("Comment was not accepted (HTTP 500)"));
        assert_eq!(form.draft.comment, "Great!");

        // после ошибки можно отправить снова
        assert!(form.begin_submit(&p1()).is_ok());
    }

    #[test]
    fn test_transport_failure_surfaces_error() {
        let mut form = filled_form();
        form.begin_submit(&p1()).unwrap();
        form.finish_submit(SubmitOutcome::TransportFailed("offline".into()));

        assert_eq!(form.error_message(), Some("Comment could not be sent: offline"));
    }

    #[test]
    fn test_validation_error_replaces_earlier_submission_error() {
        let mut form = filled_form();
        form.begin_submit(&p1()).unwrap();
        form.finish_submit(SubmitOutcome::from_status(500));

        form.set_username("");
        let result = form.begin_submit(&p1());

        assert_eq!(
            result,
            Err(SubmitRejected::Invalid(ValidationError::EmptyUsername))
        );
        assert_eq!(form.phase(), &SubmissionPhase::Editing);
        assert_eq!(form.error_message(), Some("Name is required"));

        // исправленная форма уходит, ошибка снимается
        form.set_username("Ada");
        assert!(form.begin_submit(&p1()).is_ok());
        assert_eq!(form.error_message(), None);
    }

    #[test]
    fn test_outcome_from_status() {
        assert_eq!(SubmitOutcome::from_status(200), SubmitOutcome::Accepted);
        assert_eq!(SubmitOutcome::from_status(201), SubmitOutcome::Accepted);
        assert_eq!(
            SubmitOutcome::from_status(404),
            SubmitOutcome::Rejected { status: 404 }
        );
    }

    #[test]
    fn test_finish_without_begin_is_ignored() {
        let mut form = filled_form();
        assert!(form.finish_submit(SubmitOutcome::Accepted).is_none());
        assert!(!form.banner_visible());
    }
}
