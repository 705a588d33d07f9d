//! GameEngine: countdown + prompt/score state machine
//!
//! Phase transitions:
//! - any → RUNNING: start (reshuffle, score 0, countdown reset, input armed)
//! - RUNNING → AWAITING_NEXT_PROMPT: accepted action (Correct scores 1)
//! - AWAITING_NEXT_PROMPT → RUNNING: advance ticket redeemed, prompts left
//! - AWAITING_NEXT_PROMPT → GAME_OVER: advance ticket redeemed, deck exhausted
//! - RUNNING | AWAITING_NEXT_PROMPT → GAME_OVER: countdown reaches 0
//!
//! The engine is clock-free. The host schedules ticks and redeems advance
//! tickets after the delay. When a tick and an action land together the
//! host applies the tick first, so countdown expiry wins.

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::core::{GestureGate, PromptDeck};
use crate::error::ConfigError;
use crate::types::{ActionEvent, GamePhase, GameState, PitchSample, ReasonCode};

/// Permission to advance the deck, valid only for the turn that issued it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket {
    generation: u64,
    cursor: usize,
}

impl AdvanceTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of an accepted action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub event: ActionEvent,
    pub state: GameState,
    /// Redeem with `GameEngine::advance` after the advance delay
    pub ticket: AdvanceTicket,
}

#[derive(Debug)]
pub struct GameEngine {
    deck: PromptDeck,
    gate: GestureGate,
    round_secs: u32,
    seconds_remaining: u32,
    score: u32,
    phase: GamePhase,
    /// Bumped on start, stop and game over; stale tickets never match
    generation: u64,
    pending: Option<AdvanceTicket>,
    reason: ReasonCode,
}

impl GameEngine {
    /// Engine over a deck, idle until `start`
    pub fn new(deck: PromptDeck, gate: GestureGate, round_secs: u32) -> Result<Self, ConfigError> {
        if round_secs == 0 {
            return Err(ConfigError::ZeroRoundLength);
        }
        let mut gate = gate;
        gate.disarm();
        Ok(Self {
            deck,
            gate,
            round_secs,
            seconds_remaining: round_secs,
            score: 0,
            phase: GamePhase::Idle,
            generation: 0,
            pending: None,
            reason: ReasonCode::G001_STOPPED,
        })
    }

    /// Build from validated game config
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = config.prompts.clone();
        let deck = match config.seed {
            Some(seed) => PromptDeck::seeded(catalog, seed)?,
            None => PromptDeck::new(catalog)?,
        };
        let gate = GestureGate::with_threshold(config.tilt_threshold)?;
        Self::new(deck, gate, config.round_secs)
    }

    /// Begin (or restart) a play-through
    pub fn start(&mut self) -> GameState {
        self.generation += 1;
        self.deck.shuffle();
        self.score = 0;
        self.seconds_remaining = self.round_secs;
        self.pending = None;
        self.gate.arm();
        self.phase = GamePhase::Running;
        self.reason = ReasonCode::G001_STARTED;

        info!(
            generation = self.generation,
            deck = self.deck.len(),
            seconds = self.round_secs,
            "game started"
        );
        self.snapshot()
    }

    /// One countdown unit. `None` when the countdown is not running.
    pub fn tick(&mut self) -> Option<GameState> {
        if !self.phase.is_counting_down() {
            return None;
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.finish(ReasonCode::G005_TIME_EXPIRED);
        } else {
            self.reason = ReasonCode::G002_TICK;
        }
        Some(self.snapshot())
    }

    /// Feed a motion sample through the gate; only consulted while running
    pub fn on_pitch(&mut self, sample: &PitchSample) -> Option<ActionOutcome> {
        if self.phase != GamePhase::Running {
            return None;
        }
        let event = self.gate.process(sample)?;
        Some(self.resolve(event))
    }

    /// Apply an action directly. Ignored unless running with input armed.
    pub fn on_action(&mut self, event: ActionEvent) -> Option<ActionOutcome> {
        if self.phase != GamePhase::Running || !self.gate.is_armed() {
            debug!(%event, phase = %self.phase, "action ignored");
            return None;
        }
        self.gate.disarm();
        Some(self.resolve(event))
    }

    fn resolve(&mut self, event: ActionEvent) -> ActionOutcome {
        self.reason = match event {
            ActionEvent::Correct => {
                self.score += 1;
                ReasonCode::G003_CORRECT
            }
            ActionEvent::Pass => ReasonCode::G003_PASS,
        };
        self.phase = GamePhase::AwaitingNextPrompt;

        let ticket = AdvanceTicket {
            generation: self.generation,
            cursor: self.deck.cursor(),
        };
        self.pending = Some(ticket);

        debug!(%event, score = self.score, cursor = ticket.cursor, "action accepted");
        ActionOutcome {
            event,
            state: self.snapshot(),
            ticket,
        }
    }

    /// Redeem an advance ticket. Stale tickets (reset, stop, game over, or
    /// already redeemed) are discarded and yield `None`.
    pub fn advance(&mut self, ticket: AdvanceTicket) -> Option<GameState> {
        if self.phase != GamePhase::AwaitingNextPrompt || self.pending != Some(ticket) {
            debug!(
                ticket_generation = ticket.generation,
                generation = self.generation,
                "discarding stale advance"
            );
            return None;
        }
        self.pending = None;

        if self.deck.advance() {
            self.phase = GamePhase::Running;
            self.reason = ReasonCode::G004_ADVANCED;
            self.gate.arm();
        } else {
            self.finish(ReasonCode::G005_DECK_EXHAUSTED);
        }
        Some(self.snapshot())
    }

    /// Tear down: back to idle, input disarmed, outstanding tickets void
    pub fn stop(&mut self) -> GameState {
        self.generation += 1;
        self.pending = None;
        self.gate.disarm();
        self.phase = GamePhase::Idle;
        self.reason = ReasonCode::G001_STOPPED;
        self.snapshot()
    }

    fn finish(&mut self, reason: ReasonCode) {
        self.generation += 1;
        self.pending = None;
        self.gate.disarm();
        self.phase = GamePhase::GameOver;
        self.reason = reason;
        info!(score = self.score, reason = reason.code(), "game over");
    }

    /// Current snapshot without mutating
    pub fn snapshot(&self) -> GameState {
        GameState {
            timestamp: chrono::Utc::now(),
            seconds_remaining: self.seconds_remaining,
            score: self.score,
            cursor: self.deck.cursor(),
            deck_len: self.deck.len(),
            phase: self.phase,
            prompt: self.deck.current().cloned(),
            reason: self.reason,
            generation: self.generation,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn cursor(&self) -> usize {
        self.deck.cursor()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_armed(&self) -> bool {
        self.gate.is_armed()
    }

    pub fn deck(&self) -> &PromptDeck {
        &self.deck
    }
}

// =============================================================================
// TESTS
// =============================================================================
