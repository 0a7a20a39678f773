pub mod state;

pub use state::{
    AckTicket, CommentForm, SubmissionPhase, SubmitOutcome, SubmitRejected, ACK_MESSAGE,
    ACK_WINDOW_MS,
};
