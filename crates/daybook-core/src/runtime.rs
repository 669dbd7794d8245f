use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use crate::config::CoreConfig;
use crate::events::CoreEvent;
use crate::store::JournalStore;
use crate::worker::{StoreCommand, StoreWorker};

#[derive(Clone)]
pub struct CoreHandle {
    command_tx: Sender<StoreCommand>,
}

impl CoreHandle {
    pub fn send(&self, command: StoreCommand) -> Result<(), mpsc::SendError<StoreCommand>> {
        self.command_tx.send(command)
    }
}

/// Spawns the store worker thread and hands out the channels to talk to it.
pub struct CoreRuntime {
    event_rx: Option<Receiver<CoreEvent>>,
    handle: CoreHandle,
    worker_handle: Option<JoinHandle<()>>,
}

impl CoreRuntime {
    pub fn new(config: CoreConfig) -> std::io::Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let (command_tx, command_rx) = mpsc::channel::<StoreCommand>();
        let (event_tx, event_rx) = mpsc::channel::<CoreEvent>();

        let worker = StoreWorker::new(JournalStore::new(&config), command_rx, event_tx);
        let worker_handle = std::thread::Builder::new()
            .name("daybook-store".into())
            .spawn(move || worker.run())?;

        tracing::info!(data_dir = %config.data_dir.display(), "core runtime started");
        Ok(Self {
            event_rx: Some(event_rx),
            handle: CoreHandle { command_tx },
            worker_handle: Some(worker_handle),
        })
    }

    pub fn handle(&self) -> CoreHandle {
        self.handle.clone()
    }

    pub fn take_event_rx(&mut self) -> Option<Receiver<CoreEvent>> {
        self.event_rx.take()
    }

    /// Stop the worker after it finishes any queued commands.
    pub fn shutdown(&mut self) {
        let _ = self.handle.send(StoreCommand::Shutdown);
        if let Some(handle) = self.worker_handle.take() {
            if handle.join().is_err() {
                tracing::error!("store worker panicked");
            }
        }
    }
}

impl Drop for CoreRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RequestId;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_through_worker_thread() {
        let dir = TempDir::new().unwrap();
        let mut runtime = CoreRuntime::new(CoreConfig::new(dir.path().join("data"))).unwrap();
        let event_rx = runtime.take_event_rx().unwrap();
        assert!(runtime.take_event_rx().is_none());

        runtime
            .handle()
            .send(StoreCommand::LoadEntries {
                request_id: RequestId(1),
            })
            .unwrap();
        let event = event_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(
            event,
            CoreEvent::EntriesLoaded { result: Ok(ref entries), .. } if entries.is_empty()
        ));

        runtime.shutdown();
        assert!(dir.path().join("data").is_dir());
    }
}
