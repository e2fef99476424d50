/*
 * Audio Module
 *
 * Ambient audio is started once, on the first click. Playback is
 * best-effort: any failure is logged and the starfield keeps running
 * without sound.
 */

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use log::{error, info, warn};

use crate::error::AudioError;
use crate::params::AudioParams;

/// Something that can start ambient playback.
pub trait AmbientAudio {
    fn play(&mut self) -> Result<(), AudioError>;
}

/// Plays the ambient track through an external player process.
pub struct CommandAudio {
    enabled: bool,
    file: PathBuf,
    player: Vec<String>,
    child: Option<Child>,
}

impl CommandAudio {
    pub fn new(params: &AudioParams) -> Self {
        Self {
            enabled: params.enabled,
            file: params.file.clone(),
            player: params.player.clone(),
            child: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.child.is_some()
    }

    // Kill and reap the player process, if one was started
    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                warn!("Failed to stop audio player: {}", e);
            }
            if let Err(e) = child.wait() {
                warn!("Failed to reap audio player: {}", e);
            }
        }
    }
}

impl AmbientAudio for CommandAudio {
    fn play(&mut self) -> Result<(), AudioError> {
        if !self.enabled {
            return Err(AudioError::Disabled);
        }
        if !self.file.exists() {
            return Err(AudioError::MissingFile(self.file.clone()));
        }

        let (program, args) = self.player.split_first().ok_or(AudioError::NoPlayer)?;
        let child = Command::new(program)
            .args(args)
            .arg(&self.file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AudioError::Spawn { player: program.clone(), source })?;

        info!("Playing {} with {}", self.file.display(), program);
        self.child = Some(child);
        Ok(())
    }
}

impl Drop for CommandAudio {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Starts playback at most once, whatever the outcome of the first attempt.
pub struct AudioTrigger {
    backend: Box<dyn AmbientAudio>,
    started: bool,
}

impl AudioTrigger {
    pub fn new(backend: Box<dyn AmbientAudio>) -> Self {
        Self { backend, started: false }
    }

    pub fn start_once(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        match self.backend.play() {
            Ok(()) => {}
            Err(AudioError::Disabled) => info!("Ambient audio disabled"),
            Err(e) => error!("Audio playback failed: {}", e),
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingAudio {
        calls: Rc<Cell<u32>>,
        fail: bool,
    }

    impl AmbientAudio for CountingAudio {
        fn play(&mut self) -> Result<(), AudioError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(AudioError::NoPlayer)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_trigger_plays_once() {
        let calls = Rc::new(Cell::new(0));
        let mut trigger = AudioTrigger::new(Box::new(CountingAudio { calls: calls.clone(), fail: false }));

        assert!(!trigger.started());
        trigger.start_once();
        trigger.start_once();
        trigger.start_once();
        assert_eq!(calls.get(), 1);
        assert!(trigger.started());
    }

    #[test]
    fn test_failed_start_is_not_retried() {
        let calls = Rc::new(Cell::new(0));
        let mut trigger = AudioTrigger::new(Box::new(CountingAudio { calls: calls.clone(), fail: true }));

        trigger.start_once();
        trigger.start_once();
        assert_eq!(calls.get(), 1);
        assert!(trigger.started());
    }

    #[test]
    fn test_command_audio_errors() {
        let disabled = AudioParams { enabled: false, ..Default::default() };
        assert!(matches!(CommandAudio::new(&disabled).play(), Err(AudioError::Disabled)));

        let missing = AudioParams { file: PathBuf::from("/nonexistent/ambient.mp3"), ..Default::default() };
        assert!(matches!(CommandAudio::new(&missing).play(), Err(AudioError::MissingFile(_))));
    }

    #[test]
    fn test_command_audio_without_player() {
        // Cargo.toml stands in for the audio file
        let params = AudioParams {
            file: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml"),
            player: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(CommandAudio::new(&params).play(), Err(AudioError::NoPlayer)));
    }

    #[cfg(unix)]
    #[test]
    fn test_stop_kills_and_reaps_player() {
        // The file path lands in $0 of the shell and is ignored
        let params = AudioParams {
            file: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml"),
            player: vec!["sh".to_string(), "-c".to_string(), "exec sleep 30".to_string()],
            ..Default::default()
        };
        let mut audio = CommandAudio::new(&params);
        audio.play().unwrap();
        assert!(audio.is_playing());

        let started = std::time::Instant::now();
        audio.stop();
        assert!(!audio.is_playing());
        assert!(started.elapsed() < std::time::Duration::from_secs(10));

        // A second stop has nothing left to do
        audio.stop();
    }
}
