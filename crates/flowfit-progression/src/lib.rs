pub mod achievement;
pub mod engine;
pub mod standing;
pub mod tier;

pub use achievement::{AchievementCard, AchievementTrait, Rarity};
pub use engine::{CompletionOutcome, EvolutionEvent, ProgressionEngine, StreakSignal};
pub use standing::{required_xp_for_level, ProgressionStanding};
pub use tier::Tier;
