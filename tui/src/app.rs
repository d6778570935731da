use crate::activity::ActivityScope;
use crate::activity::PointerActivity;
use crate::picker_view::PickerView;
use color_eyre::eyre::Result;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::MouseEventKind;
use crossterm::execute;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use quickpick_core::Candidate;
use quickpick_core::Key;
use quickpick_core::PickerConfig;
use quickpick_core::PickerHost;
use quickpick_core::Ranker;
use quickpick_core::Selection;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use std::io;
use tracing::debug;
use tracing::trace;

/// How a picker session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerOutcome {
    Selected(Selection),
    Cancelled,
}

/// Records the first commit or cancel; later reports are ignored.
#[derive(Default)]
struct OutcomeHost {
    outcome: Option<PickerOutcome>,
}

impl PickerHost for OutcomeHost {
    fn on_select(&mut self, selection: Option<Selection>) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(match selection {
            Some(selection) => PickerOutcome::Selected(selection),
            None => PickerOutcome::Cancelled,
        });
    }

    fn on_key_press(&mut self, key: Key, query: &str) {
        trace!(%key, query, "key press");
    }
}

/// Area for the popup: anchored top-left, full width, as tall as needed.
pub fn popup_area(screen: Rect, desired_height: u16) -> Rect {
    Rect::new(
        screen.x,
        screen.y,
        screen.width,
        desired_height.min(screen.height),
    )
}

/// Drives `view` with `events` until it commits or cancels. Running out of
/// events counts as a cancel.
///
/// Pointer presses the view does not claim are published to `scope`, which is
/// how clicks elsewhere on screen dismiss the picker.
pub fn run_picker<B, R, I>(
    terminal: &mut Terminal<B>,
    view: &mut PickerView<R>,
    scope: &ActivityScope,
    events: I,
) -> Result<PickerOutcome>
where
    B: Backend,
    R: Ranker,
    I: IntoIterator<Item = io::Result<Event>>,
{
    let mut host = OutcomeHost::default();
    let mut events = events.into_iter();
    view.mount(scope);

    let outcome = loop {
        terminal.draw(|frame| {
            let area = popup_area(frame.area(), view.desired_height());
            view.render(area, frame.buffer_mut());
        })?;

        if let Some(outcome) = host.outcome.take() {
            break outcome;
        }

        let Some(event) = events.next() else {
            debug!("input ended without a selection");
            break PickerOutcome::Cancelled;
        };

        match event? {
            Event::Key(key) => view.handle_key(key, &mut host),
            Event::Mouse(mouse) => {
                let claimed = view.handle_mouse(mouse, &mut host);
                if !claimed && matches!(mouse.kind, MouseEventKind::Down(_)) {
                    scope.dispatch(PointerActivity {
                        column: mouse.column,
                        row: mouse.row,
                    });
                }
            }
            Event::Paste(text) => {
                for ch in text.chars().filter(|ch| !ch.is_control()) {
                    view.handle_key(KeyEvent::from(KeyCode::Char(ch)), &mut host);
                }
            }
            Event::Resize(..) | Event::FocusGained | Event::FocusLost => {}
        }
        view.drain_pending(&mut host);
    };

    view.unmount();
    Ok(outcome)
}

/// Restores the terminal on every exit path, panics included.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(
            io::stderr(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stderr(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    }
}

/// Runs an interactive picker on stderr.
pub fn run(config: &PickerConfig, candidates: Vec<Candidate>) -> Result<PickerOutcome> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;
    let scope = ActivityScope::new();
    let mut view = PickerView::new(config, candidates);
    run_picker(
        &mut terminal,
        &mut view,
        &scope,
        std::iter::repeat_with(crossterm::event::read),
    )
}
