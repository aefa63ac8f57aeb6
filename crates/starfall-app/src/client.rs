//! Client handle for the game loop thread.
//!
//! Bridges callers (input layer, tests, the headless binary) to the game
//! loop via channels and the shared snapshot.

use starfall_core::commands::ModeCommand;
use starfall_core::config::CombatConfig;
use starfall_core::enums::PlayerClass;
use starfall_core::state::CombatSnapshot;

use crate::error::AppError;
use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

#[derive(Default)]
pub struct GameClient {
    state: AppState,
}

impl GameClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the game loop thread if it is not already running.
    pub fn start(&self, config: CombatConfig, class: PlayerClass) -> Result<(), AppError> {
        let mut tx_lock = self.state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        if tx_lock.is_some() {
            return Err(AppError::AlreadyRunning);
        }

        let handle =
            game_loop::spawn_game_loop(config, class, self.state.latest_snapshot.clone())?;
        *tx_lock = Some(handle.commands);
        *self.state.worker.lock().map_err(|_| AppError::Poisoned)? = Some(handle.thread);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.state
            .command_tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false)
    }

    /// Queue a command for the next frame boundary.
    pub fn send(&self, command: ModeCommand) -> Result<(), AppError> {
        let tx_lock = self.state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::Mode(command))
                .map_err(|_| AppError::Disconnected),
            None => Err(AppError::NotStarted),
        }
    }

    /// Latest snapshot published by the loop, if any frame has run.
    pub fn snapshot(&self) -> Result<Option<CombatSnapshot>, AppError> {
        let lock = self
            .state
            .latest_snapshot
            .lock()
            .map_err(|_| AppError::Poisoned)?;
        Ok(lock.clone())
    }

    /// Stop the loop and wait for its thread to exit.
    pub fn shutdown(&self) -> Result<(), AppError> {
        let tx = self
            .state
            .command_tx
            .lock()
            .map_err(|_| AppError::Poisoned)?
            .take()
            .ok_or(AppError::NotStarted)?;
        // The loop may already have exited; joining below still succeeds.
        let _ = tx.send(GameLoopCommand::Shutdown);

        let worker = self.state.worker.lock().map_err(|_| AppError::Poisoned)?.take();
        if let Some(worker) = worker {
            if worker.join().is_err() {
                log::error!("Game loop thread panicked");
            }
        }
        Ok(())
    }
}

impl Drop for GameClient {
    fn drop(&mut self) {
        if self.is_running() {
            let _ = self.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use starfall_core::enums::{GameMode, SessionPhase};
    use starfall_core::Vec3;

    fn wait_for(client: &GameClient, pred: impl Fn(&CombatSnapshot) -> bool) -> CombatSnapshot {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(snapshot) = client.snapshot().unwrap() {
                if pred(&snapshot) {
                    return snapshot;
                }
            }
            assert!(Instant::now() < deadline, "timed out waiting for game loop");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_send_before_start_fails() {
        let client = GameClient::new();
        assert!(matches!(
            client.send(ModeCommand::LeaveCombat),
            Err(AppError::NotStarted)
        ));
        assert!(matches!(client.shutdown(), Err(AppError::NotStarted)));
    }

    #[test]
    fn test_game_loop_runs_combat() {
        let client = GameClient::new();
        client
            .start(CombatConfig::default(), PlayerClass::Phantom)
            .unwrap();
        assert!(client.is_running());
        assert!(matches!(
            client.start(CombatConfig::default(), PlayerClass::Phantom),
            Err(AppError::AlreadyRunning)
        ));

        client
            .send(ModeCommand::EnterSpaceCombat { origin: Vec3::ZERO })
            .unwrap();
        let snapshot = wait_for(&client, |s| s.phase == SessionPhase::Active);
        assert_eq!(snapshot.mode, GameMode::SpaceCombat);
        assert_eq!(snapshot.enemies.len(), 5);

        client.send(ModeCommand::LeaveCombat).unwrap();
        wait_for(&client, |s| s.phase == SessionPhase::Inactive);

        client.shutdown().unwrap();
        assert!(!client.is_running());
    }
}
