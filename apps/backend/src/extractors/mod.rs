pub mod current_user;
pub mod decision_submission;
pub mod participant_round;
pub mod validated_json;

pub use current_user::CurrentUser;
pub use decision_submission::DecisionSubmission;
pub use participant_round::ParticipantRound;
pub use validated_json::ValidatedJson;
