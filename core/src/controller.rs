use std::fmt;
use std::sync::Arc;

use tracing::info;
use tracing::trace;

use crate::candidate::Candidate;
use crate::candidate::Selection;
use crate::config::PickerConfig;
use crate::ranking::NucleoRanker;
use crate::ranking::Ranker;
use crate::state::SearchState;
use crate::synth::NewEntrySynthesizer;
use crate::view::RowView;
use crate::view::ViewAdapter;

/// Abstract input the view translates raw events into.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TextChanged(String),
    CandidateSetChanged(Vec<Candidate>),
    ArrowUp,
    ArrowDown,
    PageUp(usize),
    PageDown(usize),
    Enter,
    Escape,
    Space,
    HoverOption(usize),
    ClickOption(usize),
    /// Pointer activity outside the widget's surface.
    OutsideActivity,
}

/// Raw keystroke identifiers reported to [`PickerHost::on_key_press`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Char(char),
    /// A character chord with the control modifier held, e.g. `Ctrl+w`.
    Ctrl(char),
    /// A character chord with the alt modifier held.
    Alt(char),
    Function(u8),
    /// Any key the terminal reports that has no variant of its own.
    Unidentified,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::ArrowUp => f.write_str("ArrowUp"),
            Key::ArrowDown => f.write_str("ArrowDown"),
            Key::ArrowLeft => f.write_str("ArrowLeft"),
            Key::ArrowRight => f.write_str("ArrowRight"),
            Key::PageUp => f.write_str("PageUp"),
            Key::PageDown => f.write_str("PageDown"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::Enter => f.write_str("Enter"),
            Key::Escape => f.write_str("Escape"),
            Key::Tab => f.write_str("Tab"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Delete => f.write_str("Delete"),
            Key::Char(ch) => write!(f, "{ch}"),
            Key::Ctrl(ch) => write!(f, "Ctrl+{ch}"),
            Key::Alt(ch) => write!(f, "Alt+{ch}"),
            Key::Function(n) => write!(f, "F{n}"),
            Key::Unidentified => f.write_str("Unidentified"),
        }
    }
}

/// Whether the view should still apply its own default handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Consumed,
    PassThrough,
}

/// Receives commit/cancel results and, optionally, every raw keystroke.
pub trait PickerHost {
    /// Called once per commit (`Some`) or cancel (`None`).
    fn on_select(&mut self, selection: Option<Selection>);

    /// Sees each keystroke before the controller acts on it.
    fn on_key_press(&mut self, _key: Key, _query: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Unfocused,
    Active,
}

/// The picker's interaction state machine.
pub struct InteractionController<R: Ranker = NucleoRanker> {
    candidates: Vec<Arc<Candidate>>,
    ranker: R,
    synthesizer: NewEntrySynthesizer,
    complete_prefix: Option<String>,
    help_text: Option<String>,
    state: SearchState,
    focus: Focus,
}

impl InteractionController<NucleoRanker> {
    pub fn new(config: &PickerConfig, candidates: Vec<Candidate>) -> Self {
        let ranker = NucleoRanker::new(config.case_matching, config.normalization);
        Self::with_ranker(config, candidates, ranker)
    }
}

impl<R: Ranker> InteractionController<R> {
    pub fn with_ranker(config: &PickerConfig, candidates: Vec<Candidate>, ranker: R) -> Self {
        let mut controller = Self {
            candidates: candidates.into_iter().map(Arc::new).collect(),
            ranker,
            synthesizer: NewEntrySynthesizer::from_config(config),
            complete_prefix: config.complete_prefix.clone(),
            help_text: config.help_text.clone(),
            state: SearchState::default(),
            focus: Focus::Unfocused,
        };
        controller.recompute(String::new());
        controller
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn query(&self) -> &str {
        self.state.query()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn candidates(&self) -> &[Arc<Candidate>] {
        &self.candidates
    }

    /// Host-trusted help markup, returned as given.
    pub fn help_markup(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    pub fn rows(&self) -> Vec<RowView> {
        let highlighted = self.state.highlighted_index();
        self.state
            .results()
            .iter()
            .enumerate()
            .map(|(idx, row)| RowView::new(row, Some(idx) == highlighted))
            .collect()
    }

    /// Activates the picker. Focus is requested on the first mount only.
    pub fn mount<V: ViewAdapter + ?Sized>(&mut self, view: &mut V) {
        if self.focus == Focus::Active {
            return;
        }
        self.focus = Focus::Active;
        view.request_focus();
    }

    /// Re-asserts the highlighted row's visibility after a render pass.
    pub fn after_render<V: ViewAdapter + ?Sized>(&self, view: &mut V) {
        if let Some(index) = self.state.highlighted_index() {
            view.reveal_row(index);
        }
    }

    /// Handles one raw keystroke. The host observer runs first.
    pub fn key_down<H: PickerHost + ?Sized>(&mut self, key: Key, host: &mut H) -> Disposition {
        trace!(%key, query = self.state.query(), "key down");
        host.on_key_press(key, self.state.query());

        let action = match key {
            Key::ArrowUp => Action::ArrowUp,
            Key::ArrowDown => Action::ArrowDown,
            Key::Enter => Action::Enter,
            Key::Escape => Action::Escape,
            Key::Char(' ') => Action::Space,
            _ => return Disposition::PassThrough,
        };
        self.dispatch(action, host)
    }

    pub fn dispatch<H: PickerHost + ?Sized>(&mut self, action: Action, host: &mut H) -> Disposition {
        match action {
            Action::TextChanged(text) => self.recompute(text),
            Action::CandidateSetChanged(candidates) => {
                self.candidates = candidates.into_iter().map(Arc::new).collect();
                let query = self.state.query().to_string();
                self.recompute(query);
            }
            Action::ArrowUp => self.state.move_up(1),
            Action::ArrowDown => self.state.move_down(1),
            Action::PageUp(step) => self.state.move_up(step),
            Action::PageDown(step) => self.state.move_down(step),
            Action::Enter => {
                if let Some(index) = self.state.highlighted_index() {
                    self.commit(index, host);
                }
                return Disposition::Consumed;
            }
            Action::Escape | Action::OutsideActivity => {
                info!("picker cancelled");
                host.on_select(None);
            }
            Action::Space => {
                if self.state.query().is_empty()
                    && let Some(prefix) = self.complete_prefix.clone()
                {
                    self.recompute(prefix);
                    return Disposition::Consumed;
                }
                return Disposition::PassThrough;
            }
            Action::HoverOption(index) => self.state.set_highlighted(index),
            Action::ClickOption(index) => self.commit(index, host),
        }
        Disposition::PassThrough
    }

    fn commit<H: PickerHost + ?Sized>(&self, index: usize, host: &mut H) {
        let Some(row) = self.state.get(index) else {
            return;
        };
        info!(name = row.name(), synthetic = row.is_synthetic(), "picker committed");
        host.on_select(Some(Selection::from(row)));
    }

    fn recompute(&mut self, query: String) {
        self.state
            .recompute(query, &self.candidates, &mut self.ranker, &self.synthesizer);
    }
}
