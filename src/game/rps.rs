use std::fmt;
use std::str::FromStr;

use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use super::Score;
use crate::ai::{QLearner, RpsState, Tier, markov};
use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    /// Natural enumeration order, used for every tie-break.
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    pub fn index(self) -> usize {
        match self {
            Choice::Rock => 0,
            Choice::Paper => 1,
            Choice::Scissors => 2,
        }
    }

    /// Persisted / wire name.
    pub fn name(self) -> &'static str {
        match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Choice::Rock => "Rock",
            Choice::Paper => "Paper",
            Choice::Scissors => "Scissors",
        }
    }

    /// The choice this one defeats.
    pub fn beats(self) -> Choice {
        match self {
            Choice::Rock => Choice::Scissors,
            Choice::Paper => Choice::Rock,
            Choice::Scissors => Choice::Paper,
        }
    }

    /// The choice that defeats this one.
    pub fn counter(self) -> Choice {
        match self {
            Choice::Rock => Choice::Paper,
            Choice::Paper => Choice::Scissors,
            Choice::Scissors => Choice::Rock,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Choice {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Choice::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownChoice(s.to_string()))
    }
}

/// Result of `mine` against `theirs`: 1 win, 0 tie, -1 loss.
pub fn outcome(mine: Choice, theirs: Choice) -> i8 {
    if mine == theirs {
        0
    } else if mine.beats() == theirs {
        1
    } else {
        -1
    }
}

/// One resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub player: Choice,
    pub ai: Choice,
}

impl Round {
    /// Outcome value from the player's side.
    pub fn outcome(&self) -> i8 {
        outcome(self.player, self.ai)
    }

    /// "You: Rock vs AI: Paper -> You Lose!"
    pub fn summary(&self) -> String {
        let verdict = match self.outcome() {
            1 => "Win",
            0 => "Tie",
            _ => "Lose",
        };
        format!(
            "You: {} vs AI: {} -> You {}!",
            self.player.label(),
            self.ai.label(),
            verdict
        )
    }
}

/// Rock-Paper-Scissors against the AI. Every `play` is a full round.
pub struct RockPaperScissors {
    history: Vec<Round>,
    state: RpsState,
    score: Score,
    learner: QLearner,
    rng: StdRng,
}

impl RockPaperScissors {
    pub fn new(learner: QLearner) -> Self {
        Self::with_rng(learner, StdRng::from_os_rng())
    }

    /// Deterministic naive/biased choices, for tests and `--seed`. The learner
    /// carries its own generator.
    pub fn with_seed(learner: QLearner, seed: u64) -> Self {
        Self::with_rng(learner, StdRng::seed_from_u64(seed))
    }

    fn with_rng(learner: QLearner, rng: StdRng) -> Self {
        RockPaperScissors {
            history: Vec::new(),
            state: RpsState::START,
            score: Score::default(),
            learner,
            rng,
        }
    }

    /// Resolve a round: the AI commits to its choice first, then the player's
    /// choice is revealed. The learning tier updates its table afterwards.
    pub fn play(&mut self, choice: Choice, tier: Tier) -> Round {
        let ai = self.ai_move(tier);
        let round = Round { player: choice, ai };

        if tier == Tier::Learning {
            let reward = -f64::from(round.outcome());
            let next = self.state.next(choice);
            self.learner.update(self.state, ai, reward, next);
            self.state = next;
        }

        match round.outcome() {
            1 => self.score.player += 1,
            -1 => self.score.ai += 1,
            _ => {}
        }
        self.history.push(round);
        round
    }

    /// The AI's choice for the coming round. Does not look at the player's
    /// pending choice.
    pub fn ai_move(&mut self, tier: Tier) -> Choice {
        match tier {
            Tier::Naive => random_choice(&mut self.rng),
            Tier::Biased => markov::respond(&self.history, &mut self.rng),
            Tier::Learning => self.learner.select(self.state),
            Tier::Minimax => {
                warn!("rock-paper-scissors has no {} tier, playing at random", tier.name());
                random_choice(&mut self.rng)
            }
        }
    }

    /// Clear history, learning state key, and score. The learned table stays.
    pub fn reset(&mut self) {
        self.history.clear();
        self.state = RpsState::START;
        self.score = Score::default();
    }

    pub fn history(&self) -> &[Round] {
        &self.history
    }

    pub fn state(&self) -> RpsState {
        self.state
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn learner(&self) -> &QLearner {
        &self.learner
    }

    pub fn learner_mut(&mut self) -> &mut QLearner {
        &mut self.learner
    }
}

fn random_choice(rng: &mut StdRng) -> Choice {
    *Choice::ALL.choose(rng).unwrap_or(&Choice::Rock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{QLearningConfig, QTable};

    fn engine(epsilon: f64) -> RockPaperScissors {
        let config = QLearningConfig {
            epsilon,
            ..QLearningConfig::default()
        };
        RockPaperScissors::with_seed(QLearner::with_seed(config, QTable::new(), 9), 9)
    }

    #[test]
    fn test_outcome_is_antisymmetric() {
        for a in Choice::ALL {
            assert_eq!(outcome(a, a), 0);
            for b in Choice::ALL {
                assert_eq!(outcome(a, b), -outcome(b, a), "{a} vs {b}");
            }
        }
        assert_eq!(outcome(Choice::Rock, Choice::Scissors), 1);
        assert_eq!(outcome(Choice::Paper, Choice::Rock), 1);
        assert_eq!(outcome(Choice::Scissors, Choice::Paper), 1);
    }

    #[test]
    fn test_counter_beats_choice() {
        for c in Choice::ALL {
            assert_eq!(outcome(c.counter(), c), 1);
            assert_eq!(outcome(c, c.beats()), 1);
        }
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!("rock".parse::<Choice>(), Ok(Choice::Rock));
        assert_eq!(" Paper ".parse::<Choice>(), Ok(Choice::Paper));
        assert_eq!("SCISSORS".parse::<Choice>(), Ok(Choice::Scissors));
        assert!("lizard".parse::<Choice>().is_err());
    }

    #[test]
    fn test_round_summary() {
        let round = Round {
            player: Choice::Rock,
            ai: Choice::Paper,
        };
        assert_eq!(round.summary(), "You: Rock vs AI: Paper -> You Lose!");
    }

    #[test]
    fn test_play_scores_and_records_history() {
        let mut game = engine(0.1);
        for _ in 0..20 {
            game.play(Choice::Rock, Tier::Naive);
        }
        assert_eq!(game.history().len(), 20);
        let score = game.score();
        let ties = game.history().iter().filter(|r| r.outcome() == 0).count() as u32;
        assert_eq!(score.player + score.ai + ties, 20);
        // Non-learning tiers never move the learning state.
        assert_eq!(game.state(), RpsState::START);
    }

    #[test]
    fn test_biased_counters_repeated_choice() {
        let mut game = engine(0.1);
        // One round of history gives a uniform prediction: rock, countered by paper.
        game.play(Choice::Scissors, Tier::Biased);
        assert_eq!(game.play(Choice::Scissors, Tier::Biased).ai, Choice::Paper);
        for _ in 0..5 {
            let round = game.play(Choice::Scissors, Tier::Biased);
            assert_eq!(round.ai, Choice::Rock);
        }
    }

    #[test]
    fn test_learning_tier_advances_state_and_table() {
        let mut game = engine(0.0);
        game.play(Choice::Rock, Tier::Learning);
        assert_eq!(game.state().to_string(), "start,rock");
        game.play(Choice::Paper, Tier::Learning);
        assert_eq!(game.state().to_string(), "rock,paper");

        let table = game.learner().table();
        assert!(table.get(&RpsState::START).is_some());
        assert!(table.get(&"start,rock".parse().unwrap()).is_some());
        assert!(table.get(&"rock,paper".parse().unwrap()).is_some());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_reset_keeps_learned_table() {
        let mut game = engine(0.0);
        for _ in 0..4 {
            game.play(Choice::Rock, Tier::Learning);
        }
        let learned = game.learner().table().clone();
        game.reset();
        assert!(game.history().is_empty());
        assert_eq!(game.score(), Score::default());
        assert_eq!(game.state(), RpsState::START);
        assert_eq!(game.learner().table(), &learned);
    }

    #[test]
    fn test_unsupported_tier_still_plays() {
        let mut game = engine(0.1);
        let round = game.play(Choice::Rock, Tier::Minimax);
        assert!(Choice::ALL.contains(&round.ai));
    }
}
