use super::*;
use crate::api::Api;
use crate::chat::Commentator;
use crate::config::Retry;
use crate::dto::*;
use crate::player::Decision;
use crate::player::Player;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// Seats the player once the first snapshot arrives; the snapshot is the
/// only thing a player can be built from.
pub type Seat = Box<dyn FnOnce(&Snapshot) -> Box<dyn Player> + Send>;

/// State machine for one live game against the remote server.
///
/// Imperative shell that owns the player (the decision-making core) and a
/// single event queue fed by a background [`Reader`]. Events are
/// dispatched strictly in arrival order; the keep-alive counter and the
/// turn logic depend on that order. The loop terminates when the server
/// reports a result, when the abort budget against a vanished peer is
/// spent, or when the stream ends; every exit path concludes the player
/// exactly once.
///
/// Lifecycle of the mutable state:
/// - `player` is `None` until the first snapshot seats it, then mutated
///   in place for the rest of the session
/// - `status` only ever advances (created, started, over)
/// - `pings` counts consecutive keep-alives and resets on every state
///   update and after each abort request
/// - `abortions` only grows
pub struct Session {
    api: Arc<dyn Api>,
    game_id: String,
    queue: Queue,
    halt: Arc<AtomicBool>,
    retry: Retry,
    seat: Option<Seat>,
    commentator: Box<dyn Commentator>,
    player: Option<Box<dyn Player>>,
    status: Status,
    pings: u32,
    abortions: u32,
}

impl Session {
    pub fn new(
        api: Arc<dyn Api>,
        game_id: impl Into<String>,
        seat: impl FnOnce(&Snapshot) -> Box<dyn Player> + Send + 'static,
        commentator: Box<dyn Commentator>,
        retry: Retry,
    ) -> Self {
        Self {
            api,
            game_id: game_id.into(),
            queue: Queue::default(),
            halt: Arc::new(AtomicBool::new(false)),
            retry,
            seat: Some(Box::new(seat)),
            commentator,
            player: None,
            status: Status::Created,
            pings: 0,
            abortions: 0,
        }
    }

    /// Runs the session to its terminal state. Blocks the calling task
    /// until the server reports a result, the abort budget is spent, or
    /// the stream ends.
    pub async fn run(mut self) {
        let reader = Reader::new(
            self.api.clone(),
            self.game_id.clone(),
            self.queue.tap(),
            self.halt.clone(),
            self.retry.clone(),
        );
        tokio::spawn(reader.run());
        while let Some(event) = self.queue.pop().await {
            if self.dispatch(event).await {
                break;
            }
        }
        self.halt.store(true, Ordering::Relaxed);
        if let Some(ref mut player) = self.player {
            player.conclude();
        }
        log::info!("[game {}] session closed", self.game_id);
    }

    /// Applies one event; true once the session reached a terminal state.
    async fn dispatch(&mut self, event: Event) -> bool {
        match event {
            Event::Full(snapshot) => self.on_full(snapshot).await,
            Event::State(update) => self.on_state(update).await,
            Event::Chat(line) => self.on_chat(line).await,
            Event::OpponentGone => false, // the keep-alive path covers a peer that never returns
            Event::Ping => self.on_ping().await,
            Event::EndOfStream => {
                log::warn!("[game {}] stream ended unexpectedly", self.game_id);
                true
            }
        }
    }
}

// event handlers, one per wire kind
impl Session {
    async fn on_full(&mut self, snapshot: Snapshot) -> bool {
        if let Some(ref mut player) = self.player {
            player.absorb(&snapshot);
        } else {
            log::info!("[game {}] started", self.game_id);
            let seat = self.seat.take().expect("seated at most once");
            self.player = Some(seat(&snapshot));
        }
        match self.our_turn() {
            true => self.make_move().await,
            false => {
                if let Some(ref mut player) = self.player {
                    player.ponder();
                }
            }
        }
        false
    }

    async fn on_state(&mut self, update: Update) -> bool {
        self.pings = 0;
        let Some(ref mut player) = self.player else {
            log::warn!("[game {}] state update before snapshot", self.game_id);
            return false;
        };
        let changed = player.advance(&update);
        self.status = self.status.max(Status::from_wire(&update.status));
        if self.status != Status::Started {
            log::info!("{}", player.result_message(update.winner.as_deref()));
            return true;
        }
        if player.is_over() {
            return false;
        }
        if changed && self.our_turn() {
            self.make_move().await;
        }
        false
    }

    async fn on_chat(&mut self, line: ChatLine) -> bool {
        if let Some(player) = self.player.as_deref() {
            self.commentator.handle(&line, player).await;
        }
        false
    }

    async fn on_ping(&mut self) -> bool {
        self.pings += 1;
        if self.pings < crate::PING_ABORT_THRESHOLD {
            return false;
        }
        if !self.player.as_ref().is_some_and(|p| p.is_abortable()) {
            return false;
        }
        log::info!(
            "[game {}] peer silent for {} keep-alives, requesting abort",
            self.game_id,
            self.pings
        );
        self.pings = 0;
        self.abortions += 1;
        self.api
            .abort_game(&self.game_id)
            .await
            .inspect_err(|e| log::error!("[game {}] abort request failed: {:#}", self.game_id, e))
            .ok();
        self.abortions >= crate::MAX_ABORT_REQUESTS
    }
}

impl Session {
    /// Asks the player for its decision and reports it to the server.
    /// Blocks the session loop for the duration of move computation.
    async fn make_move(&mut self) {
        let Decision {
            mv,
            offer_draw,
            resign,
        } = match self.player.as_deref_mut() {
            Some(player) => player.best_move().await,
            None => return,
        };
        if resign {
            self.api
                .resign_game(&self.game_id)
                .await
                .inspect_err(|e| log::error!("[game {}] resignation failed: {:#}", self.game_id, e))
                .ok();
        } else {
            self.api
                .send_move(&self.game_id, &mv, offer_draw)
                .await
                .inspect_err(|e| log::error!("[game {}] move rejected: {:#}", self.game_id, e))
                .ok();
            if let Some(player) = self.player.as_deref() {
                self.commentator.share_eval(player).await;
            }
        }
    }

    fn our_turn(&self) -> bool {
        self.player.as_ref().is_some_and(|p| p.is_our_turn())
    }
}
