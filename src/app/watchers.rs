use std::path::PathBuf;
use std::sync::mpsc::{Receiver, channel};

use super::App;
use crate::config::{apply_overrides, read_config};
use crate::event::Event;

/// Watch the config file on a background thread; each change sends one unit message.
pub(crate) fn spawn_config_watcher(path: PathBuf) -> Receiver<()> {
    let (tx, rx) = channel::<()>();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        let watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        });
        let mut watcher = match watcher {
            Ok(w) => w,
            Err(e) => {
                log::warn!("config watcher unavailable: {}", e);
                return;
            }
        };
        if let Err(e) = watcher.watch(path.as_path(), RecursiveMode::NonRecursive) {
            log::warn!("not watching {}: {}", path.display(), e);
            return;
        }
        log::debug!("watching {} for changes", path.display());
        loop {
            std::thread::sleep(std::time::Duration::from_secs(3600));
        }
    });
    rx
}

impl App {
    /// Drain watcher messages; a readable config becomes a `ConfigReloaded` event.
    pub fn process_config_file_events(&mut self) {
        let Some(rx) = self.config_event_rx.as_ref() else {
            return;
        };
        if rx.try_iter().count() == 0 {
            return;
        }
        match read_config(&self.config_path) {
            Ok(mut config) => {
                apply_overrides(&mut config, self.storage_override.as_deref());
                self.queue.emit_now(Event::ConfigReloaded {
                    config: Box::new(config),
                });
            }
            Err(e) => {
                log::warn!(
                    "config reload failed ({}): {}; keeping current settings",
                    self.config_path.display(),
                    e
                );
            }
        }
    }
}
