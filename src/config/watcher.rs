use anyhow::Result;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;
use tracing::{error, info, warn};

/// Quiet period after the last event before reloading.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches the config file and the discovery directory, calling `on_change`
/// once per burst of modifications.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    paths: Vec<PathBuf>,
}

impl ConfigWatcher {
    pub fn new<F>(paths: Vec<PathBuf>, on_change: F) -> Result<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(tx, Config::default())?;

        let mut watched = Vec::new();
        for path in paths {
            if path.exists() {
                watcher.watch(&path, RecursiveMode::Recursive)?;
                info!("Watching configuration path: {}", path.display());
                watched.push(path);
            } else {
                warn!(
                    "Configuration path does not exist, skipping: {}",
                    path.display()
                );
            }
        }

        std::thread::spawn(move || Self::run(rx, on_change));

        Ok(Self {
            _watcher: watcher,
            paths: watched,
        })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    fn run<F: Fn()>(rx: Receiver<notify::Result<Event>>, on_change: F) {
        loop {
            match rx.recv() {
                Ok(Ok(event)) => {
                    if !is_content_change(&event.kind) {
                        continue;
                    }
                    // Editors often write a file in several steps.
                    while rx.recv_timeout(DEBOUNCE).is_ok() {}
                    info!("Configuration change detected, reloading...");
                    on_change();
                }
                Ok(Err(e)) => error!("Watch error: {:?}", e),
                Err(e) => {
                    error!("Watch channel error: {:?}", e);
                    break;
                }
            }
        }
    }
}

fn is_content_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};

    #[test]
    fn test_content_changes() {
        assert!(is_content_change(&EventKind::Create(CreateKind::File)));
        assert!(is_content_change(&EventKind::Modify(ModifyKind::Any)));
        assert!(!is_content_change(&EventKind::Access(AccessKind::Any)));
    }

    #[test]
    fn test_missing_paths_are_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        let watcher = ConfigWatcher::new(
            vec![dir.path().to_path_buf(), dir.path().join("missing")],
            || {},
        )
        .unwrap();
        assert_eq!(watcher.paths(), &[dir.path().to_path_buf()]);
    }
}
