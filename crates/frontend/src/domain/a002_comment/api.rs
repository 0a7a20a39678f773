use contracts::domain::a002_comment::aggregate::CreateCommentRequest;
use contracts::usecases::u001_comment_submission::SubmitOutcome;
use gloo_net::http::Request;

use crate::shared::api_utils::comment_api_url;

/// POST /api/comment; результат определяется по HTTP-статусу ответа
pub async fn post_comment(request: &CreateCommentRequest) -> SubmitOutcome {
    let built = match Request::post(&comment_api_url()).json(request) {
        Ok(built) => built,
        Err(e) => return SubmitOutcome::TransportFailed(e.to_string()),
    };

    match built.send().await {
        Ok(response) => {
            let outcome = SubmitOutcome::from_status(response.status());
            if outcome != SubmitOutcome::Accepted {
                log::warn!("Comment rejected: HTTP {}", response.status());
            }
            outcome
        }
        Err(e) => {
            log::error!("Comment request failed: {}", e);
            SubmitOutcome::TransportFailed(e.to_string())
        }
    }
}
