use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use feed_core::{update, AppState, Msg, PhotoUrlBridge, SessionId, SubscriptionId};
use feed_logging::{feed_debug, feed_info, feed_warn};

use super::config::{self, GridConfig};
use super::effects::{EffectRunner, EffectSink};
use super::input;
use super::logging;
use super::ui::constants::{CLEAR_SCREEN, HELP_TEXT};
use super::ui::layout::GridLayout;
use super::ui::render::{render, GridFrame};

/// Everything the UI thread reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Core(Msg),
    ShowHelp,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = config::config_path();
    let (config, warnings) = config::load(&config_path);
    logging::initialize(&config.log);
    for warning in warnings {
        feed_warn!("{}", warning);
    }
    feed_info!("photo_feed starting, config {:?}", config_path);

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.feed.fetch_settings(), tx.clone())?;
    input::spawn_reader(tx.clone());

    // Background tick to throttle rendering.
    thread::spawn(move || {
        let interval = Duration::from_millis(75);
        while tx.send(AppEvent::Core(Msg::Tick)).is_ok() {
            thread::sleep(interval);
        }
    });

    let mut shell = AppShell::new(&config.grid, std::io::stdout());
    shell.dispatch(Msg::SessionStarted, &runner);
    shell.flush_render()?;

    while let Ok(event) = rx.recv() {
        match event {
            AppEvent::Core(msg) => {
                let tick = msg == Msg::Tick;
                shell.dispatch(msg, &runner);
                if tick {
                    shell.flush_render()?;
                }
            }
            AppEvent::ShowHelp => shell.show_help()?,
            AppEvent::Quit => break,
        }
    }

    shell.shutdown(&runner);
    feed_info!("photo_feed shutting down");
    drop(runner);
    Ok(())
}

/// UI-thread owner of the state machine, the URL bridge and the terminal surface.
pub struct AppShell<W: Write> {
    state: AppState,
    bridge: PhotoUrlBridge,
    frame: Rc<RefCell<GridFrame>>,
    grid_subscription: Option<SubscriptionId>,
    layout: GridLayout,
    shown_session: Option<SessionId>,
    needs_render: bool,
    out: W,
}

impl<W: Write> AppShell<W> {
    pub fn new(grid: &GridConfig, out: W) -> Self {
        let frame = Rc::new(RefCell::new(GridFrame::default()));
        let mut bridge = PhotoUrlBridge::new();
        let sink = frame.clone();
        let grid_subscription = bridge.subscribe(move |urls| {
            let mut frame = sink.borrow_mut();
            frame.urls = urls.to_vec();
            frame.updated_at = (!urls.is_empty())
                .then(|| chrono::Local::now().format("%H:%M:%S").to_string());
        });

        Self {
            state: AppState::new(),
            bridge,
            frame,
            grid_subscription: Some(grid_subscription),
            layout: GridLayout::new(grid.columns, grid.tile_width),
            shown_session: None,
            needs_render: false,
            out,
        }
    }

    pub fn dispatch(&mut self, msg: Msg, effects: &dyn EffectSink) {
        let state = std::mem::take(&mut self.state);
        let (mut state, pending) = update(state, msg);

        let session_id = state.session().map(|session| session.id());
        if session_id != self.shown_session {
            // New or ended session scope: every observer sees the grid empty.
            feed_debug!("session changed {:?} -> {:?}", self.shown_session, session_id);
            self.bridge.publish(&[]);
            self.shown_session = session_id;
        }
        if let Some(urls) = state.take_publication() {
            self.bridge.publish(&urls);
        }
        if state.consume_dirty() {
            self.needs_render = true;
        }
        self.state = state;

        effects.run(pending);
    }

    /// Ends the session and detaches the grid from the bridge.
    pub fn shutdown(&mut self, effects: &dyn EffectSink) {
        self.dispatch(Msg::SessionEnded, effects);
        if let Some(id) = self.grid_subscription.take() {
            self.bridge.unsubscribe(id);
        }
    }

    /// Redraws when something changed since the last frame.
    pub fn flush_render(&mut self) -> std::io::Result<()> {
        if !std::mem::take(&mut self.needs_render) {
            return Ok(());
        }
        let view = self.state.view();
        let lines = render(&view, &self.frame.borrow(), self.layout);
        write!(self.out, "{CLEAR_SCREEN}")?;
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    pub fn show_help(&mut self) -> std::io::Result<()> {
        for line in HELP_TEXT {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn frame(&self) -> GridFrame {
        self.frame.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_core::{Effect, FeedItem, FetchFailure};

    #[derive(Default)]
    struct RecordingSink {
        effects: RefCell<Vec<Effect>>,
    }

    impl EffectSink for RecordingSink {
        fn run(&self, effects: Vec<Effect>) {
            self.effects.borrow_mut().extend(effects);
        }
    }

    fn shell() -> AppShell<Vec<u8>> {
        AppShell::new(&GridConfig::default(), Vec::new())
    }

    fn last_fetch(sink: &RecordingSink) -> u64 {
        match sink.effects.borrow().last() {
            Some(Effect::FetchFeed { request_id }) => *request_id,
            other => panic!("expected FetchFeed, got {other:?}"),
        }
    }

    fn output(shell: &AppShell<Vec<u8>>) -> String {
        String::from_utf8(shell.out.clone()).unwrap()
    }

    #[test]
    fn accepted_photo_reaches_grid_through_bridge() {
        let sink = RecordingSink::default();
        let mut shell = shell();
        shell.dispatch(Msg::SessionStarted, &sink);
        shell.dispatch(Msg::LoadNextClicked, &sink);
        let request_id = last_fetch(&sink);

        shell.dispatch(
            Msg::FetchCompleted {
                request_id,
                result: Ok(vec![FeedItem::new("Harbour", "https://img/harbour.jpg")]),
            },
            &sink,
        );

        let frame = shell.frame();
        assert_eq!(frame.urls, vec!["https://img/harbour.jpg".to_string()]);
        assert!(frame.updated_at.is_some());
        assert_eq!(frame.urls, shell.state().view().photo_urls);

        shell.flush_render().unwrap();
        let text = output(&shell);
        assert!(text.contains("1 photo"));
        assert!(text.contains("img/harbour.jpg"));
    }

    #[test]
    fn failed_fetch_leaves_grid_alone() {
        let sink = RecordingSink::default();
        let mut shell = shell();
        shell.dispatch(Msg::SessionStarted, &sink);
        shell.dispatch(Msg::LoadNextClicked, &sink);
        let request_id = last_fetch(&sink);

        shell.dispatch(
            Msg::FetchCompleted {
                request_id,
                result: Err(FetchFailure::Transport("offline".to_string())),
            },
            &sink,
        );

        assert!(shell.frame().urls.is_empty());
        assert!(shell.frame().updated_at.is_none());
        shell.flush_render().unwrap();
        assert!(output(&shell).contains("Load failed: transport error: offline"));
    }

    #[test]
    fn reset_clears_grid_and_cancels_pending_fetch() {
        let sink = RecordingSink::default();
        let mut shell = shell();
        shell.dispatch(Msg::SessionStarted, &sink);
        shell.dispatch(Msg::LoadNextClicked, &sink);
        let first = last_fetch(&sink);
        shell.dispatch(
            Msg::FetchCompleted {
                request_id: first,
                result: Ok(vec![FeedItem::new("a", "u1")]),
            },
            &sink,
        );
        shell.dispatch(Msg::LoadNextClicked, &sink);
        let second = last_fetch(&sink);

        shell.dispatch(Msg::ResetClicked, &sink);

        assert_eq!(
            sink.effects.borrow().last(),
            Some(&Effect::CancelFetch { request_id: second })
        );
        assert!(shell.frame().urls.is_empty());
        assert_eq!(shell.state().view().session_id, Some(2));
    }

    #[test]
    fn render_only_happens_when_dirty() {
        let sink = RecordingSink::default();
        let mut shell = shell();
        shell.dispatch(Msg::SessionStarted, &sink);
        shell.flush_render().unwrap();
        let first_len = shell.out.len();
        assert!(first_len > 0);

        shell.dispatch(Msg::Tick, &sink);
        shell.flush_render().unwrap();
        assert_eq!(shell.out.len(), first_len);
    }

    #[test]
    fn session_change_publishes_empty_list_to_every_observer() {
        let sink = RecordingSink::default();
        let mut shell = shell();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let recorder = seen.clone();
        shell
            .bridge
            .subscribe(move |urls| recorder.borrow_mut().push(urls.to_vec()));

        shell.dispatch(Msg::SessionStarted, &sink);
        shell.dispatch(Msg::LoadNextClicked, &sink);
        let request_id = last_fetch(&sink);
        shell.dispatch(
            Msg::FetchCompleted {
                request_id,
                result: Ok(vec![FeedItem::new("a", "u1")]),
            },
            &sink,
        );
        shell.dispatch(Msg::ResetClicked, &sink);

        assert_eq!(
            *seen.borrow(),
            vec![Vec::new(), vec!["u1".to_string()], Vec::new()]
        );
        assert_eq!(shell.frame(), GridFrame::default());
        assert_eq!(shell.frame().urls, shell.state().view().photo_urls);
    }

    #[test]
    fn shutdown_ends_session_and_detaches_grid() {
        let sink = RecordingSink::default();
        let mut shell = shell();
        shell.dispatch(Msg::SessionStarted, &sink);
        shell.dispatch(Msg::LoadNextClicked, &sink);
        let request_id = last_fetch(&sink);

        shell.shutdown(&sink);

        assert_eq!(
            sink.effects.borrow().last(),
            Some(&Effect::CancelFetch { request_id })
        );
        assert!(shell.state().session().is_none());
        assert!(shell.grid_subscription.is_none());

        shell.bridge.publish(&["late".to_string()]);
        assert!(shell.frame().urls.is_empty());
    }
}
