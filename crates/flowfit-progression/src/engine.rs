use crate::standing::{required_xp_for_level, ProgressionStanding};
use crate::tier::Tier;
use flowfit_rewards::RewardBreakdown;
use flowfit_types::{FlowFitError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Streak continuation verdict from the external calendar resolver. The
/// engine does no day-boundary logic of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreakSignal {
    Continued,
    Broken,
}

/// Fired when a completion pushes the user's tier past its previous value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionEvent {
    pub from: Tier,
    pub to: Tier,
    pub at_level: u32,
}

/// Result of applying one completion to a standing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionOutcome {
    pub standing: ProgressionStanding,
    /// Present iff the recomputed tier is strictly greater than the
    /// pre-update tier; the caller decides whether to submit the on-chain
    /// evolve transaction.
    pub evolution: Option<EvolutionEvent>,
}

/// Applies reward breakdowns to a user's progression standing. Stateless:
/// takes a standing by value, returns the updated one for the caller to
/// persist. Concurrent completions for the same user must be serialized by
/// the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressionEngine;

impl ProgressionEngine {
    pub fn new() -> Self {
        Self
    }

    /// One challenge completion, applied atomically: either the full set of
    /// counter/level/tier effects lands, or the input standing is returned
    /// untouched inside the error path (the caller's copy is never
    /// partially mutated since we operate on a value).
    pub fn apply_completion(
        &self,
        standing: ProgressionStanding,
        breakdown: &RewardBreakdown,
        streak: StreakSignal,
    ) -> Result<CompletionOutcome> {
        if !breakdown.is_consistent() {
            return Err(FlowFitError::InvalidState(format!(
                "breakdown total {} does not match its components",
                breakdown.total
            )));
        }
        if !standing.is_consistent() {
            return Err(FlowFitError::InvalidState(format!(
                "standing corrupted: level {} carries tier {} with streak {}/{}",
                standing.level, standing.tier, standing.current_streak, standing.longest_streak
            )));
        }

        let previous_tier = standing.tier;
        let mut next = standing;

        next.total_challenges_completed = next
            .total_challenges_completed
            .checked_add(1)
            .ok_or_else(|| FlowFitError::InvalidState("challenge counter overflow".into()))?;

        next.total_tokens_earned = next
            .total_tokens_earned
            .checked_add(breakdown.total)
            .ok_or_else(|| FlowFitError::InvalidState("token counter overflow".into()))?;

        let xp_gain = breakdown.total.to_fft() / 2;
        next.experience_points = next
            .experience_points
            .checked_add(xp_gain)
            .ok_or_else(|| FlowFitError::InvalidState("experience counter overflow".into()))?;

        next.current_streak = match streak {
            StreakSignal::Continued => next.current_streak.saturating_add(1),
            StreakSignal::Broken => 0,
        };
        next.longest_streak = next.longest_streak.max(next.current_streak);

        // Consume thresholds one level at a time; large gains can cross
        // several in a single completion
        while next.experience_points >= required_xp_for_level(next.level) {
            next.experience_points -= required_xp_for_level(next.level);
            next.level += 1;
        }
        next.tier = Tier::from_level(next.level);

        let evolution = if next.tier > previous_tier {
            info!(
                from = %previous_tier,
                to = %next.tier,
                level = next.level,
                "⚡ Tier evolution ready"
            );
            Some(EvolutionEvent {
                from: previous_tier,
                to: next.tier,
                at_level: next.level,
            })
        } else {
            None
        };

        debug!(
            level = next.level,
            xp = next.experience_points,
            xp_gain,
            streak = next.current_streak,
            total_earned = next.total_tokens_earned.to_fft(),
            "Completion applied"
        );

        Ok(CompletionOutcome {
            standing: next,
            evolution,
        })
    }
}
