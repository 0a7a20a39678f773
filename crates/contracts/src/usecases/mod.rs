pub mod u001_comment_submission;
