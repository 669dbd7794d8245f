use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;

use daybook_core::events::CoreEvent;
use daybook_core::runtime::CoreHandle;
use daybook_core::worker::StoreCommand;

use crate::input::handle_key;
use crate::render::render;
use crate::ui::notifications::Notification;
use crate::ui::{App, Tui};

/// Interval at which store results are drained and status messages expire
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Hand commands to the store worker. A closed channel means the worker is
/// gone; that is reported on the status line rather than ending the session.
fn dispatch(app: &mut App, handle: &CoreHandle, commands: Vec<StoreCommand>) {
    for command in commands {
        tracing::trace!(?command, "dispatch");
        if let Err(e) = handle.send(command) {
            tracing::error!("store worker unavailable: {}", e);
            app.set_status(Notification::error("Storage is unavailable"));
            break;
        }
    }
}

/// Apply every store result that has arrived since the last tick.
fn drain_core_events(app: &mut App, handle: &CoreHandle, event_rx: &Receiver<CoreEvent>) {
    loop {
        match event_rx.try_recv() {
            Ok(event) => {
                tracing::debug!(request_id = %event.request_id(), "core event");
                let follow_up = app.apply_core_event(event);
                dispatch(app, handle, follow_up);
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("core event channel closed");
                break;
            }
        }
    }
}

pub async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    handle: CoreHandle,
    event_rx: Receiver<CoreEvent>,
) -> Result<()> {
    let mut event_stream = EventStream::new();
    let mut tick_interval = tokio::time::interval(TICK_INTERVAL);

    let startup = app.startup();
    dispatch(app, &handle, startup);

    while app.running {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        let commands = handle_key(app, key);
                        dispatch(app, &handle, commands);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("terminal event error: {}", e);
                        return Err(e.into());
                    }
                    None => {
                        tracing::info!("terminal event stream ended");
                        app.quit();
                    }
                }
            }
            _ = tick_interval.tick() => {
                drain_core_events(app, &handle, &event_rx);
                app.tick();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook_core::config::CoreConfig;
    use daybook_core::models::TodoStatus;
    use daybook_core::runtime::CoreRuntime;

    use crate::ui::Screen;

    /// Send `commands` and apply results, including follow-ups, until nothing
    /// is in flight.
    fn settle(
        app: &mut App,
        handle: &CoreHandle,
        rx: &Receiver<CoreEvent>,
        commands: Vec<StoreCommand>,
    ) {
        let mut outstanding = commands.len();
        for command in commands {
            handle.send(command).unwrap();
        }
        while outstanding > 0 {
            let event = rx
                .recv_timeout(Duration::from_secs(5))
                .expect("store result");
            outstanding -= 1;
            let follow_up = app.apply_core_event(event);
            outstanding += follow_up.len();
            for command in follow_up {
                handle.send(command).unwrap();
            }
        }
    }

    #[test]
    fn test_entry_todos_and_status_round_trip_through_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut core = CoreRuntime::new(CoreConfig::new(dir.path())).unwrap();
        let handle = core.handle();
        let rx = core.take_event_rx().unwrap();
        let mut app = App::new();

        let startup = app.startup();
        settle(&mut app, &handle, &rx, startup);
        assert!(app.entries.is_empty());

        app.open_entry_form();
        app.entry_form
            .editor
            .set_text("Standup @work\n!todo send notes");
        let save = app.save_entry();
        settle(&mut app, &handle, &rx, save);
        assert_eq!(app.entries.len(), 1);
        assert_eq!(app.todos.len(), 1);
        assert_eq!(
            app.todos[0].entry_id.as_deref(),
            Some(app.entries[0].id.as_str())
        );
        assert!(!app.entry_form.is_dirty());

        // saving again reuses the linked todo
        let save = app.save_entry();
        settle(&mut app, &handle, &rx, save);
        assert_eq!(app.entries.len(), 1);
        assert_eq!(app.todos.len(), 1);

        let open = app.navigate(Screen::TodosList);
        settle(&mut app, &handle, &rx, open);
        let cycle = app.cycle_selected_todo();
        settle(&mut app, &handle, &rx, cycle);
        let reload = app.load_all();
        settle(&mut app, &handle, &rx, reload);
        assert_eq!(app.todos[0].status, TodoStatus::Next);

        assert!(dir.path().join("entries.json").exists());
        assert!(dir.path().join("todos.json").exists());
        core.shutdown();
    }

    #[test]
    fn test_delete_keeps_linked_todos_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut core = CoreRuntime::new(CoreConfig::new(dir.path())).unwrap();
        let handle = core.handle();
        let rx = core.take_event_rx().unwrap();
        let mut app = App::new();

        app.open_entry_form();
        app.entry_form.editor.set_text("Errands\n!todo buy stamps");
        let save = app.save_entry();
        settle(&mut app, &handle, &rx, save);

        let open = app.open_entries();
        settle(&mut app, &handle, &rx, open);
        app.request_delete();
        let delete = app.request_delete();
        settle(&mut app, &handle, &rx, delete);

        assert!(app.entries.is_empty());
        assert_eq!(app.todos.len(), 1);
        assert_eq!(app.status.as_ref().unwrap().message, "✓ Entry deleted");
        core.shutdown();
    }
}
