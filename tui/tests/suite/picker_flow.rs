#![expect(clippy::expect_used)]

use assert_matches::assert_matches;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use pretty_assertions::assert_eq;
use quickpick_core::Candidate;
use quickpick_core::PickerConfig;
use quickpick_tui::ActivityScope;
use quickpick_tui::PickerOutcome;
use quickpick_tui::PickerView;
use quickpick_tui::app::run_picker;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::io;

const WIDTH: u16 = 40;
const HEIGHT: u16 = 20;

fn press(code: KeyCode) -> io::Result<Event> {
    Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

fn typed(text: &str) -> Vec<io::Result<Event>> {
    text.chars().map(|ch| press(KeyCode::Char(ch))).collect()
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> io::Result<Event> {
    Ok(Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }))
}

fn names(list: &[&str]) -> Vec<Candidate> {
    list.iter().map(|name| Candidate::new(*name)).collect()
}

struct Session {
    terminal: Terminal<TestBackend>,
    scope: ActivityScope,
    view: PickerView,
}

impl Session {
    fn new(config: PickerConfig, candidates: Vec<Candidate>) -> Self {
        Self {
            terminal: Terminal::new(TestBackend::new(WIDTH, HEIGHT)).expect("terminal"),
            scope: ActivityScope::new(),
            view: PickerView::new(&config, candidates),
        }
    }

    fn run(&mut self, events: Vec<io::Result<Event>>) -> PickerOutcome {
        run_picker(&mut self.terminal, &mut self.view, &self.scope, events).expect("run picker")
    }

    fn screen_row(&self, y: u16) -> String {
        let buffer = self.terminal.backend().buffer();
        (0..WIDTH)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }
}

fn selected_name(outcome: &PickerOutcome) -> &str {
    match outcome {
        PickerOutcome::Selected(selection) => selection.candidate.name.as_str(),
        PickerOutcome::Cancelled => panic!("expected a selection, got a cancel"),
    }
}

#[test]
fn typing_then_enter_commits_best_match() {
    let mut session = Session::new(
        PickerConfig::default(),
        names(&["main", "develop", "feature/login"]),
    );
    let mut events = typed("dev");
    events.push(press(KeyCode::Enter));

    let outcome = session.run(events);
    assert_eq!(selected_name(&outcome), "develop");
    assert_eq!(session.view.query(), "dev");
}

#[test]
fn escape_cancels() {
    let mut session = Session::new(PickerConfig::default(), names(&["main"]));
    let outcome = session.run(vec![press(KeyCode::Down), press(KeyCode::Esc)]);
    assert_eq!(outcome, PickerOutcome::Cancelled);
    assert_eq!(session.scope.listener_count(), 0);
}

#[test]
fn ctrl_c_cancels() {
    let mut session = Session::new(PickerConfig::default(), names(&["main"]));
    let ctrl_c = Ok(Event::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )));
    assert_eq!(session.run(vec![ctrl_c]), PickerOutcome::Cancelled);
}

#[test]
fn exhausted_input_cancels() {
    let mut session = Session::new(PickerConfig::default(), names(&["main"]));
    assert_eq!(session.run(typed("ma")), PickerOutcome::Cancelled);
}

#[test]
fn click_outside_cancels() {
    let mut session = Session::new(PickerConfig::default(), names(&["main", "develop"]));
    let outcome = session.run(vec![mouse(MouseEventKind::Down(MouseButton::Left), 5, 15)]);
    assert_eq!(outcome, PickerOutcome::Cancelled);
}

#[test]
fn click_on_row_commits_without_cancel() {
    let mut session = Session::new(
        PickerConfig::default(),
        names(&["main", "develop", "feature/login"]),
    );
    // Border on row 0, search line on row 1, results from row 2.
    let outcome = session.run(vec![
        mouse(MouseEventKind::Moved, 5, 4),
        mouse(MouseEventKind::Down(MouseButton::Left), 5, 3),
    ]);
    assert_eq!(selected_name(&outcome), "develop");
}

#[test]
fn arrows_move_highlight_before_commit() {
    let mut session = Session::new(PickerConfig::default(), names(&["a", "b", "c"]));
    let outcome = session.run(vec![
        press(KeyCode::Down),
        press(KeyCode::Down),
        press(KeyCode::Down),
        press(KeyCode::Up),
        press(KeyCode::Enter),
    ]);
    assert_eq!(selected_name(&outcome), "b");
}

#[test]
fn new_entry_is_offered_and_committed() {
    let config = PickerConfig {
        allow_new: true,
        new_hint: Some("create branch".to_string()),
        ..PickerConfig::default()
    };
    let mut session = Session::new(config, names(&["main"]));
    let mut events = typed("topic");
    events.push(press(KeyCode::Enter));

    let outcome = session.run(events);
    assert_matches!(&outcome, PickerOutcome::Selected(selection) if selection.is_new());
    assert_eq!(selected_name(&outcome), "topic");
    assert_eq!(session.screen_row(2), "│› + topic  create branch              │");
}

#[test]
fn space_on_empty_query_completes_prefix() {
    let config = PickerConfig {
        complete_prefix: Some("git ".to_string()),
        ..PickerConfig::default()
    };
    let mut session = Session::new(config, names(&["ls", "git push", "git pull"]));
    let mut events = typed(" pus");
    events.push(press(KeyCode::Enter));

    let outcome = session.run(events);
    assert_eq!(session.view.query(), "git pus");
    assert_eq!(selected_name(&outcome), "git push");
}

#[test]
fn pinned_candidates_render_first() {
    let candidates = vec![
        Candidate::new("zeta"),
        Candidate::new("beta").with_order_id(2),
        Candidate::new("alpha").with_order_id(1),
    ];
    let config = PickerConfig {
        label: "Pick".to_string(),
        ..PickerConfig::default()
    };
    let mut session = Session::new(config, candidates);
    assert_eq!(session.run(Vec::new()), PickerOutcome::Cancelled);

    assert_eq!(session.screen_row(0), "┌ Pick ────────────────────────────────┐");
    assert_eq!(session.screen_row(2), "│› alpha                               │");
    assert_eq!(session.screen_row(3), "│  beta                                │");
    assert_eq!(session.screen_row(4), "│  zeta                                │");
    assert_eq!(session.screen_row(5), "└──────────────────────────────────────┘");
}
