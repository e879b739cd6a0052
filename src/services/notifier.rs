//! Finish notifications: desktop popup and completion sound

use tokio::{process::Command, runtime::Handle};
use tracing::{debug, error, info, warn};

use crate::{engine::FinishNotifier, error::DialError};

pub const APP_NAME: &str = "Dial Timer";
pub const FINISH_MESSAGE: &str = "Time is up!";
pub const COMPLETION_SOUND: &str = "/usr/share/sounds/freedesktop/stereo/complete.oga";

/// Notifier that shells out to `notify-send` and `paplay`.
///
/// Both commands run as detached runtime tasks; failures are logged and never
/// reach the engine.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    pub app_name: String,
    pub message: String,
    pub sound_file: String,
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            message: FINISH_MESSAGE.to_string(),
            sound_file: COMPLETION_SOUND.to_string(),
        }
    }
}

impl FinishNotifier for DesktopNotifier {
    fn on_finish(&self) {
        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime available, skipping finish notification");
            return;
        };

        let (app_name, message) = (self.app_name.clone(), self.message.clone());
        runtime.spawn(async move {
            if let Err(e) = send_desktop_notification(&app_name, &message).await {
                error!("Failed to dispatch notification: {}", e);
            }
        });

        let sound_file = self.sound_file.clone();
        runtime.spawn(async move {
            if let Err(e) = play_sound(&sound_file).await {
                error!("Failed to play completion sound: {}", e);
            }
        });
    }
}

/// Notifier that only writes a log line
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl FinishNotifier for LogNotifier {
    fn on_finish(&self) {
        info!("{}", FINISH_MESSAGE);
    }
}

/// Show a desktop notification with `notify-send`
pub async fn send_desktop_notification(app_name: &str, message: &str) -> Result<(), DialError> {
    run_command("notify-send", &["-i", "appointment-soon", app_name, message]).await?;
    info!("Desktop notification sent");
    Ok(())
}

/// Play a sound file with `paplay`
pub async fn play_sound(path: &str) -> Result<(), DialError> {
    run_command("paplay", &[path]).await?;
    debug!("Played {}", path);
    Ok(())
}

/// Check whether an external command can be launched
pub async fn check_command_available(program: &str) -> bool {
    match Command::new(program).arg("--version").output().await {
        Ok(_) => {
            debug!("{} is available", program);
            true
        }
        Err(e) => {
            debug!("{} is not available: {}", program, e);
            false
        }
    }
}

async fn run_command(program: &str, args: &[&str]) -> Result<(), DialError> {
    debug!("Running {} {:?}", program, args);

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| DialError::Notify {
            command: program.to_string(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DialError::Notify {
            command: program.to_string(),
            reason: format!("exit status {}: {}", output.status, stderr.trim()),
        });
    }

    Ok(())
}
