mod category;
mod counts;
mod ids;
mod progress;
mod rank;
mod reward;

pub use ids::{PROGRESS_KEY_PREFIX, TopicId, TopicIdError};

pub use category::{Category, CategoryError};
pub use counts::{ActivityCounts, CountsError};
pub use progress::ProgressRecord;
pub use rank::{MasteryRank, display_percent};
pub use reward::{REWARDS, Reward, RewardKind};
