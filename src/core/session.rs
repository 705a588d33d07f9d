//! GameSession: single owner task for a GameEngine
//!
//! All mutation happens inside one tokio task. Producers (sensor callbacks,
//! UI buttons) send `GameCommand`s; the owner ticks the countdown, schedules
//! the advance delay as an abortable task, and broadcasts a `GameState`
//! after every mutation.
//!
//! Within one wakeup the countdown is polled before delayed advances and
//! before commands, so expiry wins any tie with a tilt.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::core::{ActionOutcome, AdvanceTicket, GameEngine};
use crate::error::{ConfigError, SessionClosed};
use crate::types::{ActionEvent, GamePhase, GameState, PitchSample};
use crate::{ADVANCE_DELAY_MS, TICK_INTERVAL_MS, UPDATE_CHANNEL_CAPACITY};

/// Inputs accepted by the session owner
#[derive(Debug, Clone, PartialEq)]
pub enum GameCommand {
    /// Enter the game screen or press "Play Again"
    Start,
    /// Motion sample from the sensor
    Pitch(PitchSample),
    /// Action injected without going through the gate (e.g. on-screen buttons)
    Action(ActionEvent),
    /// Leave the game screen; the owner exits
    Stop,
}

/// Countdown and advance delay periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    pub tick: Duration,
    pub advance_delay: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(TICK_INTERVAL_MS),
            advance_delay: Duration::from_millis(ADVANCE_DELAY_MS),
        }
    }
}

impl From<&GameConfig> for SessionTiming {
    fn from(config: &GameConfig) -> Self {
        Self {
            tick: Duration::from_millis(config.tick_ms),
            advance_delay: Duration::from_millis(config.advance_delay_ms),
        }
    }
}

/// Cloneable sender for producers
#[derive(Debug, Clone)]
pub struct GameHandle {
    cmd_tx: mpsc::Sender<GameCommand>,
}

impl GameHandle {
    pub async fn send(&self, cmd: GameCommand) -> Result<(), SessionClosed> {
        self.cmd_tx.send(cmd).await.map_err(|_| SessionClosed)
    }

    /// Non-blocking, for sensor callbacks. A sample that finds the inbox
    /// full is dropped; the next one supersedes it anyway.
    pub fn offer_pitch(&self, sample: PitchSample) -> Result<(), SessionClosed> {
        match self.cmd_tx.try_send(GameCommand::Pitch(sample)) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                debug!("command inbox full, dropping pitch sample");
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(SessionClosed),
        }
    }
}

#[derive(Debug)]
pub struct GameSession {
    handle: GameHandle,
    update_tx: broadcast::Sender<GameState>,
    latest_rx: watch::Receiver<GameState>,
    task: JoinHandle<()>,
}

impl GameSession {
    /// Spawn the owner task. Must be called from within a tokio runtime.
    pub fn spawn(engine: GameEngine, timing: SessionTiming) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(UPDATE_CHANNEL_CAPACITY);
        let (update_tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        let (latest_tx, latest_rx) = watch::channel(engine.snapshot());

        let owner = Owner {
            engine,
            timing,
            update_tx: update_tx.clone(),
            latest_tx,
            pending: None,
        };
        let task = tokio::spawn(owner.run(cmd_rx));

        Self {
            handle: GameHandle { cmd_tx },
            update_tx,
            latest_rx,
            task,
        }
    }

    /// Build engine and timing from config, then spawn
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        let engine = GameEngine::from_config(config)?;
        Ok(Self::spawn(engine, SessionTiming::from(config)))
    }

    /// Receive every snapshot published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<GameState> {
        self.update_tx.subscribe()
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> GameState {
        self.latest_rx.borrow().clone()
    }

    pub fn handle(&self) -> GameHandle {
        self.handle.clone()
    }

    pub async fn start(&self) -> Result<(), SessionClosed> {
        self.handle.send(GameCommand::Start).await
    }

    pub async fn pitch(&self, sample: PitchSample) -> Result<(), SessionClosed> {
        self.handle.send(GameCommand::Pitch(sample)).await
    }

    pub async fn action(&self, event: ActionEvent) -> Result<(), SessionClosed> {
        self.handle.send(GameCommand::Action(event)).await
    }

    /// Stop the countdown, cancel any in-flight advance, and wait for the
    /// owner to exit
    pub async fn shutdown(self) {
        let _ = self.handle.send(GameCommand::Stop).await;
        if let Err(e) = self.task.await {
            warn!(error = %e, "game session task failed");
        }
    }
}

struct Owner {
    engine: GameEngine,
    timing: SessionTiming,
    update_tx: broadcast::Sender<GameState>,
    latest_tx: watch::Sender<GameState>,
    /// In-flight advance delay
    pending: Option<JoinHandle<()>>,
}

impl Owner {
    async fn run(mut self, mut cmd_rx: mpsc::Receiver<GameCommand>) {
        let (advance_tx, mut advance_rx) = mpsc::unbounded_channel::<AdvanceTicket>();
        let mut ticker = interval_at(Instant::now() + self.timing.tick, self.timing.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = ticker.tick() => {
                    if let Some(state) = self.engine.tick() {
                        if state.phase == GamePhase::GameOver {
                            self.cancel_pending();
                        }
                        self.publish(state);
                    }
                }

                Some(ticket) = advance_rx.recv() => self.on_advance(ticket),

                cmd = cmd_rx.recv() => match cmd {
                    Some(GameCommand::Start) => {
                        self.cancel_pending();
                        ticker.reset();
                        let state = self.engine.start();
                        self.publish(state);
                    }
                    Some(GameCommand::Pitch(sample)) => {
                        let outcome = self.engine.on_pitch(&sample);
                        self.accept(outcome, &advance_tx);
                    }
                    Some(GameCommand::Action(event)) => {
                        let outcome = self.engine.on_action(event);
                        self.accept(outcome, &advance_tx);
                    }
                    Some(GameCommand::Stop) | None => {
                        self.cancel_pending();
                        let state = self.engine.stop();
                        self.publish(state);
                        break;
                    }
                },
            }
        }
        debug!("game session owner exited");
    }

    fn accept(
        &mut self,
        outcome: Option<ActionOutcome>,
        advance_tx: &mpsc::UnboundedSender<AdvanceTicket>,
    ) {
        let Some(outcome) = outcome else {
            return;
        };
        self.cancel_pending();

        let tx = advance_tx.clone();
        let delay = self.timing.advance_delay;
        let ticket = outcome.ticket;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(ticket);
        }));

        self.publish(outcome.state);
    }

    /// A stale ticket leaves the current delay task (and its abort handle) alone
    fn on_advance(&mut self, ticket: AdvanceTicket) {
        if let Some(state) = self.engine.advance(ticket) {
            self.pending = None;
            self.publish(state);
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    fn publish(&self, state: GameState) {
        self.latest_tx.send_replace(state.clone());
        // No subscribers is fine
        let _ = self.update_tx.send(state);
    }
}

// =============================================================================
// TESTS
// =============================================================================
