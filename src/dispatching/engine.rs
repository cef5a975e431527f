//! Tie-break chain.
//!
//! Applies the enabled rules in caller-selected order, narrowing the
//! candidate list one rule at a time. A rule that does not strictly
//! narrow the list is skipped. Ties left after the last rule are
//! resolved by a uniform random draw from the injected RNG.

use rand::Rng;

use super::{RuleContext, RuleMetric, TieBreakRule};
use crate::models::Task;

/// Justification when only one task is eligible.
pub const ONLY_CANDIDATE: &str = "only available task";
/// Justification when enabled rules could not separate the candidates.
pub const RANDOM_AFTER_RULES: &str = "random selection after exhausting tie-break rules";
/// Justification when no rules are enabled.
pub const RANDOM_NO_RULES: &str = "random selection — no secondary rules active";

/// Output of [`TieBreakChain::reduce`].
#[derive(Debug, Clone)]
pub struct Reduction<'a> {
    /// Surviving candidates (never empty for non-empty input), in input order.
    pub candidates: Vec<&'a Task>,
    /// Rules that strictly narrowed the list, with their winning metric.
    pub narrowed_by: Vec<(TieBreakRule, RuleMetric)>,
}

impl Reduction<'_> {
    /// Names the deciding rule and any earlier narrowing rules,
    /// e.g. `longest time (45s) after tie on most following tasks (1)`.
    ///
    /// `None` if no rule narrowed the list.
    pub fn justification(&self) -> Option<String> {
        let ((last_rule, last_metric), earlier) = self.narrowed_by.split_last()?;
        let mut text = last_rule.justify(*last_metric);
        if !earlier.is_empty() {
            let ties: Vec<String> = earlier.iter().map(|(r, m)| r.justify(*m)).collect();
            text.push_str(" after tie on ");
            text.push_str(&ties.join(", "));
        }
        Some(text)
    }
}

/// How a selection was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one task was eligible.
    OnlyCandidate,
    /// A rule narrowed the list to a single task.
    Rule(TieBreakRule),
    /// Random draw among tied candidates.
    Random,
}

/// The chosen task and the reason it was chosen.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    /// Selected task.
    pub task: &'a Task,
    /// Human-readable reason, recorded in the assignment trace.
    pub justification: String,
    /// Decision category.
    pub resolution: Resolution,
}

/// Ordered list of enabled tie-break rules.
///
/// # Example
/// ```
/// use u_line_balance::dispatching::{TieBreakChain, TieBreakRule};
///
/// let chain = TieBreakChain::new()
///     .with_rule(TieBreakRule::LongestTime)
///     .with_rule(TieBreakRule::MostFollowingTasks);
/// assert_eq!(chain.rules()[0], TieBreakRule::LongestTime);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TieBreakChain {
    rules: Vec<TieBreakRule>,
    epsilon: f64,
}

impl TieBreakChain {
    /// Creates an empty chain (every tie resolved at random).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// Builds a chain from rules in selection order. Repeats are ignored.
    pub fn from_rules(rules: &[TieBreakRule]) -> Self {
        rules
            .iter()
            .fold(Self::new(), |chain, &rule| chain.with_rule(rule))
    }

    /// Appends a rule. A rule already in the chain keeps its first position.
    pub fn with_rule(mut self, rule: TieBreakRule) -> Self {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
        self
    }

    /// Enabled rules in application order.
    pub fn rules(&self) -> &[TieBreakRule] {
        &self.rules
    }

    /// Whether no rules are enabled.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Narrows candidates by applying each rule in order.
    ///
    /// Each rule keeps the candidates sharing the maximum metric. Stops
    /// early once a single candidate remains.
    pub fn reduce<'a>(&self, candidates: &[&'a Task], context: &RuleContext) -> Reduction<'a> {
        let mut remaining: Vec<&'a Task> = candidates.to_vec();
        let mut narrowed_by = Vec::new();

        for &rule in &self.rules {
            if remaining.len() <= 1 {
                break;
            }

            let metrics: Vec<RuleMetric> =
                remaining.iter().map(|t| rule.evaluate(t, context)).collect();
            let best = metrics.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            let kept: Vec<&'a Task> = remaining
                .iter()
                .zip(&metrics)
                .filter(|(_, &m)| (best - m).abs() <= self.epsilon)
                .map(|(&t, _)| t)
                .collect();

            if kept.len() < remaining.len() {
                remaining = kept;
                narrowed_by.push((rule, best));
            }
        }

        Reduction {
            candidates: remaining,
            narrowed_by,
        }
    }

    /// Picks one task from the eligible candidates.
    ///
    /// Returns `None` only for an empty candidate list.
    pub fn select<'a, R: Rng>(
        &self,
        candidates: &[&'a Task],
        context: &RuleContext,
        rng: &mut R,
    ) -> Option<Selection<'a>> {
        match candidates {
            [] => None,
            [only] => Some(Selection {
                task: *only,
                justification: ONLY_CANDIDATE.to_string(),
                resolution: Resolution::OnlyCandidate,
            }),
            _ => {
                let reduction = self.reduce(candidates, context);
                if reduction.candidates.len() == 1 {
                    let (rule, _) = reduction.narrowed_by.last().copied()?;
                    return Some(Selection {
                        task: reduction.candidates[0],
                        justification: reduction.justification()?,
                        resolution: Resolution::Rule(rule),
                    });
                }

                let pick = rng.random_range(0..reduction.candidates.len());
                let justification = if self.is_empty() {
                    RANDOM_NO_RULES
                } else {
                    RANDOM_AFTER_RULES
                };
                Some(Selection {
                    task: reduction.candidates[pick],
                    justification: justification.to_string(),
                    resolution: Resolution::Random,
                })
            }
        }
    }
}

impl Default for TieBreakChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ctx_for(counts: &[(u32, usize)]) -> RuleContext {
        counts
            .iter()
            .fold(RuleContext::new(), |ctx, &(id, n)| ctx.with_dependent_count(id, n))
    }

    #[test]
    fn test_single_candidate() {
        let t = Task::new(1, "A", 10.0);
        let chain = TieBreakChain::new();
        let mut rng = StdRng::seed_from_u64(0);
        let sel = chain.select(&[&t], &RuleContext::new(), &mut rng).unwrap();
        assert_eq!(sel.task.id, 1);
        assert_eq!(sel.justification, ONLY_CANDIDATE);
        assert_eq!(sel.resolution, Resolution::OnlyCandidate);
    }

    #[test]
    fn test_empty_candidates() {
        let chain = TieBreakChain::new().with_rule(TieBreakRule::LongestTime);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(chain.select(&[], &RuleContext::new(), &mut rng).is_none());
    }

    #[test]
    fn test_most_following_resolves() {
        let a = Task::new(1, "A", 10.0);
        let b = Task::new(2, "B", 50.0);
        let ctx = ctx_for(&[(1, 3), (2, 1)]);
        let chain = TieBreakChain::new().with_rule(TieBreakRule::MostFollowingTasks);
        let mut rng = StdRng::seed_from_u64(0);

        let sel = chain.select(&[&a, &b], &ctx, &mut rng).unwrap();
        assert_eq!(sel.task.id, 1);
        assert_eq!(sel.justification, "most following tasks (3)");
        assert_eq!(sel.resolution, Resolution::Rule(TieBreakRule::MostFollowingTasks));
    }

    #[test]
    fn test_selection_order_matters() {
        // A: more dependents, B: longer. The first enabled rule decides.
        let a = Task::new(1, "A", 10.0);
        let b = Task::new(2, "B", 50.0);
        let ctx = ctx_for(&[(1, 3), (2, 1)]);
        let mut rng = StdRng::seed_from_u64(0);

        let time_first = TieBreakChain::new()
            .with_rule(TieBreakRule::LongestTime)
            .with_rule(TieBreakRule::MostFollowingTasks);
        let sel = time_first.select(&[&a, &b], &ctx, &mut rng).unwrap();
        assert_eq!(sel.task.id, 2);
        assert_eq!(sel.justification, "longest time (50s)");

        let following_first = TieBreakChain::new()
            .with_rule(TieBreakRule::MostFollowingTasks)
            .with_rule(TieBreakRule::LongestTime);
        let sel = following_first.select(&[&a, &b], &ctx, &mut rng).unwrap();
        assert_eq!(sel.task.id, 1);
    }

    #[test]
    fn test_non_narrowing_rule_is_skipped() {
        let a = Task::new(1, "A", 20.0);
        let b = Task::new(2, "B", 30.0);
        let ctx = ctx_for(&[(1, 1), (2, 1)]);
        let chain = TieBreakChain::from_rules(&[
            TieBreakRule::MostFollowingTasks,
            TieBreakRule::LongestTime,
        ]);

        let reduction = chain.reduce(&[&a, &b], &ctx);
        assert_eq!(reduction.candidates.len(), 1);
        assert_eq!(reduction.candidates[0].id, 2);
        assert_eq!(reduction.narrowed_by, vec![(TieBreakRule::LongestTime, 30.0)]);
        assert_eq!(reduction.justification().unwrap(), "longest time (30s)");
    }

    #[test]
    fn test_two_stage_narrowing() {
        let a = Task::new(1, "A", 20.0);
        let b = Task::new(2, "B", 30.0);
        let c = Task::new(3, "C", 90.0);
        let ctx = ctx_for(&[(1, 2), (2, 2), (3, 0)]);
        let chain = TieBreakChain::from_rules(&[
            TieBreakRule::MostFollowingTasks,
            TieBreakRule::LongestTime,
        ]);
        let mut rng = StdRng::seed_from_u64(0);

        let sel = chain.select(&[&a, &b, &c], &ctx, &mut rng).unwrap();
        assert_eq!(sel.task.id, 2);
        assert_eq!(
            sel.justification,
            "longest time (30s) after tie on most following tasks (2)"
        );
    }

    #[test]
    fn test_all_rules_tie_falls_back_to_random() {
        let a = Task::new(1, "A", 30.0);
        let b = Task::new(2, "B", 30.0);
        let ctx = ctx_for(&[(1, 1), (2, 1)]);
        let chain = TieBreakChain::from_rules(&TieBreakRule::ALL);
        let mut rng = StdRng::seed_from_u64(0);

        let reduction = chain.reduce(&[&a, &b], &ctx);
        assert_eq!(reduction.candidates.len(), 2);
        assert!(reduction.justification().is_none());

        let sel = chain.select(&[&a, &b], &ctx, &mut rng).unwrap();
        assert_eq!(sel.justification, RANDOM_AFTER_RULES);
        assert_eq!(sel.resolution, Resolution::Random);
    }

    #[test]
    fn test_empty_chain_random() {
        let a = Task::new(1, "A", 10.0);
        let b = Task::new(2, "B", 50.0);
        let chain = TieBreakChain::new();
        let mut rng = StdRng::seed_from_u64(0);

        let sel = chain.select(&[&a, &b], &RuleContext::new(), &mut rng).unwrap();
        assert_eq!(sel.justification, RANDOM_NO_RULES);
        assert_eq!(sel.resolution, Resolution::Random);
    }

    #[test]
    fn test_random_draw_varies_with_seed() {
        let a = Task::new(1, "A", 10.0);
        let b = Task::new(2, "B", 10.0);
        let chain = TieBreakChain::new();
        let ctx = RuleContext::new();

        let picks: std::collections::HashSet<u32> = (0..64)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                chain.select(&[&a, &b], &ctx, &mut rng).unwrap().task.id
            })
            .collect();
        assert_eq!(picks.len(), 2);
    }

    #[test]
    fn test_duplicate_rules_ignored() {
        let chain = TieBreakChain::from_rules(&[
            TieBreakRule::LongestTime,
            TieBreakRule::LongestTime,
            TieBreakRule::MostFollowingTasks,
        ]);
        assert_eq!(
            chain.rules(),
            &[TieBreakRule::LongestTime, TieBreakRule::MostFollowingTasks]
        );
    }

    #[test]
    fn test_epsilon_tie() {
        let a = Task::new(1, "A", 0.1 + 0.2);
        let b = Task::new(2, "B", 0.3);
        let chain = TieBreakChain::new().with_rule(TieBreakRule::LongestTime);
        let reduction = chain.reduce(&[&a, &b], &RuleContext::new());
        assert_eq!(reduction.candidates.len(), 2);
    }
}
