//! Game loop thread: runs the mode controller once per rendered frame.
//!
//! The controller and the player are created inside the thread and never
//! leave it; the player is only mutated there, so no lock guards it.
//! Commands arrive via `mpsc` channel and are applied at the next frame
//! boundary. The latest snapshot is stored in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use starfall_core::commands::ModeCommand;
use starfall_core::config::CombatConfig;
use starfall_core::enums::PlayerClass;
use starfall_core::error::ConfigurationError;
use starfall_core::events::ModeEvent;
use starfall_core::render::HeadlessVisuals;
use starfall_core::state::CombatSnapshot;
use starfall_sim::pacing::FramePacer;
use starfall_sim::{ModeController, Player};

use crate::error::AppError;
use crate::state::GameLoopCommand;

/// Shortest sleep between frames, whatever the configured interval.
const MIN_FRAME_DURATION: Duration = Duration::from_millis(1);

/// Everything the game loop thread owns.
pub struct LoopSession {
    controller: ModeController<HeadlessVisuals>,
    player: Player,
    paused: bool,
    mode_events: Vec<ModeEvent>,
}

impl LoopSession {
    pub fn new(config: CombatConfig, class: PlayerClass) -> Result<Self, ConfigurationError> {
        Ok(Self {
            controller: ModeController::new(config, HeadlessVisuals::new())?,
            player: Player::new(class),
            paused: false,
            mode_events: Vec::new(),
        })
    }

    /// Apply one command.
    pub fn handle(&mut self, command: ModeCommand) {
        match command {
            ModeCommand::EnterSpaceCombat { origin } => {
                if let Err(e) = self.controller.enter_space_combat(origin, &self.player) {
                    log::warn!("EnterSpaceCombat rejected: {}", e);
                }
            }
            ModeCommand::EnterGroundCombat {
                origin,
                terrain_seed,
            } => {
                if let Err(e) =
                    self.controller
                        .enter_ground_combat(origin, terrain_seed, &self.player)
                {
                    log::warn!("EnterGroundCombat rejected: {}", e);
                }
            }
            ModeCommand::LeaveCombat => self.controller.leave_combat(),
            ModeCommand::Attack { button, direction } => {
                self.controller.attack(button, direction, &mut self.player);
            }
            ModeCommand::PurchaseUpgrade { stat } => match self.player.purchase_upgrade(stat) {
                Ok(cost) => log::info!("Upgraded {:?} for {} currency", stat, cost),
                Err(e) => log::warn!("Upgrade refused: {}", e),
            },
            ModeCommand::SetPlayerPosition { position } => {
                self.player.position = position;
            }
            ModeCommand::Pause => self.paused = true,
            ModeCommand::Resume => self.paused = false,
        }
        self.collect_mode_events();
    }

    /// Run one frame of `dt` seconds. Returns `None` while paused.
    pub fn frame(&mut self, dt: f32) -> Option<CombatSnapshot> {
        if self.paused {
            return None;
        }
        let snapshot = self.controller.tick(dt, &mut self.player);
        self.collect_mode_events();
        Some(snapshot)
    }

    fn collect_mode_events(&mut self) {
        for event in self.controller.drain_events() {
            log::info!("Mode event: {:?}", event);
            self.mode_events.push(event);
        }
    }

    /// Take mode events seen since the last call.
    pub fn take_mode_events(&mut self) -> Vec<ModeEvent> {
        std::mem::take(&mut self.mode_events)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn controller(&self) -> &ModeController<HeadlessVisuals> {
        &self.controller
    }
}

/// Handle to a running game loop thread.
pub struct GameLoopHandle {
    pub commands: mpsc::Sender<GameLoopCommand>,
    pub thread: JoinHandle<()>,
}

/// Spawns the game loop in a new thread.
///
/// The config is validated here so a bad config fails the caller instead
/// of the thread.
pub fn spawn_game_loop(
    config: CombatConfig,
    class: PlayerClass,
    latest_snapshot: Arc<Mutex<Option<CombatSnapshot>>>,
) -> Result<GameLoopHandle, AppError> {
    config.validate()?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let thread = std::thread::Builder::new()
        .name("starfall-game-loop".into())
        .spawn(move || {
            run_game_loop(config, class, cmd_rx, &latest_snapshot);
        })?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        thread,
    })
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: CombatConfig,
    class: PlayerClass,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<CombatSnapshot>>,
) {
    let frame_duration = Duration::try_from_secs_f32(config.target_frame_interval)
        .unwrap_or(MIN_FRAME_DURATION)
        .max(MIN_FRAME_DURATION);
    let mut pacer = FramePacer::from_config(&config);
    let mut session = match LoopSession::new(config, class) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Game loop failed to start: {}", e);
            return;
        }
    };

    let clock = Instant::now();
    let mut next_frame_time = clock;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Mode(cmd)) => {
                    let resuming = matches!(cmd, ModeCommand::Resume) && session.is_paused();
                    session.handle(cmd);
                    if resuming {
                        // Paused time is not simulated.
                        pacer.reset();
                    }
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Tick if the pacer lets this frame through
        if let Some(dt) = pacer.frame(clock.elapsed().as_secs_f64()) {
            if let Some(snapshot) = session.frame(dt) {
                // 3. Store latest snapshot for synchronous polling
                if let Ok(mut lock) = latest_snapshot.lock() {
                    *lock = Some(snapshot);
                }
            }
        }

        // 4. Sleep until the next frame
        next_frame_time += frame_duration;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame_duration * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_frame_time = now;
        }
    }
}
