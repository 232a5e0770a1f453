mod flag;
mod ids;
mod score;

pub use flag::{FlagError, FlagRecord};
pub use ids::FlagId;
pub use score::{QuestionOutcome, SessionScore};
