//! Terminal rendition of the picker: search line, scrolling result list and
//! help footer, plus translation of crossterm input into controller actions.

use crate::activity::ActivityScope;
use crate::activity::Subscription;
use crate::hint_bar::HintBar;
use crate::line_editor::LineEditor;
use crate::line_editor::render_editor_line;
use crate::render::virtual_list::VirtualListAdapter;
use crate::render::virtual_list::VirtualListState;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use quickpick_core::Action;
use quickpick_core::Candidate;
use quickpick_core::Disposition;
use quickpick_core::InteractionController;
use quickpick_core::Key;
use quickpick_core::NucleoRanker;
use quickpick_core::PickerConfig;
use quickpick_core::PickerHost;
use quickpick_core::Ranker;
use quickpick_core::RowView;
use quickpick_core::ViewAdapter;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

const MAX_VISIBLE_ROWS: u16 = 10;

/// Scroll and focus state the controller drives through [`ViewAdapter`].
#[derive(Debug, Default)]
struct Viewport {
    list: VirtualListState,
    list_area: Rect,
    rows: Vec<RowView>,
    focused: bool,
}

impl Viewport {
    fn item_at(&self, position: Position) -> Option<usize> {
        if !self.list_area.contains(position) {
            return None;
        }
        self.list
            .item_at(&RowsAdapter { rows: &self.rows }, self.list_area, position.y)
    }

    fn page_step(&self) -> usize {
        self.list.page_step(self.list_area)
    }
}

impl ViewAdapter for Viewport {
    fn request_focus(&mut self) {
        self.focused = true;
    }

    fn reveal_row(&mut self, index: usize) {
        self.list
            .ensure_visible(&RowsAdapter { rows: &self.rows }, index, self.list_area);
    }
}

struct RowsAdapter<'a> {
    rows: &'a [RowView],
}

impl VirtualListAdapter for RowsAdapter<'_> {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn render_item(&self, index: usize, area: Rect, buf: &mut Buffer, selected: bool) {
        let Some(row) = self.rows.get(index) else {
            return;
        };
        Paragraph::new(format_row(row, selected)).render(area, buf);
    }
}

fn format_row(row: &RowView, selected: bool) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    spans.push(if selected { "› ".cyan() } else { "  ".into() });
    if row.synthetic {
        spans.push("+ ".green());
    }
    for segment in &row.segments {
        let span = Span::from(segment.text.clone());
        spans.push(match (segment.emphasized, selected) {
            (true, _) => span.cyan().bold(),
            (false, true) => span.bold(),
            (false, false) => span,
        });
    }
    if let Some(hint) = &row.hint {
        spans.push("  ".into());
        spans.push(Span::from(hint.clone()).dim());
    }
    Line::from(spans)
}

/// The picker widget for a terminal frame.
pub struct PickerView<R: Ranker = NucleoRanker> {
    controller: InteractionController<R>,
    editor: LineEditor,
    viewport: Viewport,
    label: String,
    placeholder: String,
    icon: Option<String>,
    help: HintBar,
    surface: Rc<Cell<Rect>>,
    pending: Rc<RefCell<Vec<Action>>>,
    subscription: Option<Subscription>,
}

impl PickerView<NucleoRanker> {
    pub fn new(config: &PickerConfig, candidates: Vec<Candidate>) -> Self {
        Self::with_controller(config, InteractionController::new(config, candidates))
    }
}

impl<R: Ranker> PickerView<R> {
    pub fn with_controller(config: &PickerConfig, controller: InteractionController<R>) -> Self {
        let help = controller
            .help_markup()
            .map(HintBar::from_text)
            .unwrap_or_default();
        Self {
            controller,
            editor: LineEditor::new(),
            viewport: Viewport::default(),
            label: config.label.clone(),
            placeholder: config.placeholder.clone(),
            icon: config.icon.clone(),
            help,
            surface: Rc::new(Cell::new(Rect::default())),
            pending: Rc::new(RefCell::new(Vec::new())),
            subscription: None,
        }
    }

    pub fn controller(&self) -> &InteractionController<R> {
        &self.controller
    }

    pub fn query(&self) -> &str {
        self.controller.query()
    }

    pub fn is_focused(&self) -> bool {
        self.viewport.focused
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// First result row currently scrolled into view.
    pub fn first_visible_row(&self) -> usize {
        self.viewport.list.first_visible()
    }

    /// Starts listening for pointer activity outside the widget and takes
    /// focus.
    pub fn mount(&mut self, scope: &ActivityScope) {
        if self.subscription.is_none() {
            let surface = Rc::clone(&self.surface);
            let pending = Rc::clone(&self.pending);
            self.subscription = Some(scope.subscribe(move |activity| {
                let position = Position::new(activity.column, activity.row);
                if !surface.get().contains(position) {
                    pending.borrow_mut().push(Action::OutsideActivity);
                }
            }));
        }
        self.controller.mount(&mut self.viewport);
    }

    pub fn unmount(&mut self) {
        self.subscription = None;
        self.pending.borrow_mut().clear();
    }

    /// Feeds an action to the controller and keeps the search line in sync
    /// with the query it ends up with.
    pub fn dispatch<H: PickerHost + ?Sized>(&mut self, action: Action, host: &mut H) -> Disposition {
        let disposition = self.controller.dispatch(action, host);
        self.editor.set_text(self.controller.query());
        disposition
    }

    /// Runs actions queued by the outside-activity listener.
    pub fn drain_pending<H: PickerHost + ?Sized>(&mut self, host: &mut H) {
        let actions = std::mem::take(&mut *self.pending.borrow_mut());
        for action in actions {
            self.dispatch(action, host);
        }
    }

    pub fn handle_key<H: PickerHost + ?Sized>(&mut self, event: KeyEvent, host: &mut H) {
        if event.kind == KeyEventKind::Release {
            return;
        }

        let key = translate_key(event);
        if self.controller.key_down(key, host) == Disposition::Consumed {
            self.editor.set_text(self.controller.query());
            return;
        }

        let before = self.editor.as_str().to_string();
        self.apply_default(key, host);
        if self.editor.as_str() != before {
            let text = self.editor.as_str().to_string();
            self.controller.dispatch(Action::TextChanged(text), host);
        }
    }

    fn apply_default<H: PickerHost + ?Sized>(&mut self, key: Key, host: &mut H) {
        match key {
            Key::PageUp => {
                let step = self.viewport.page_step();
                self.controller.dispatch(Action::PageUp(step), host);
            }
            Key::PageDown => {
                let step = self.viewport.page_step();
                self.controller.dispatch(Action::PageDown(step), host);
            }
            Key::ArrowLeft => self.editor.move_left(),
            Key::ArrowRight => self.editor.move_right(),
            Key::Home => self.editor.move_home(),
            Key::End => self.editor.move_end(),
            Key::Backspace => self.editor.backspace(),
            Key::Delete => self.editor.delete(),
            Key::Char(ch) => self.editor.insert(ch),
            Key::Ctrl('w') => self.editor.delete_word(),
            Key::Ctrl('u') => self.editor.clear(),
            Key::ArrowUp
            | Key::ArrowDown
            | Key::Enter
            | Key::Escape
            | Key::Tab
            | Key::Ctrl(_)
            | Key::Alt(_)
            | Key::Function(_)
            | Key::Unidentified => {}
        }
    }

    /// Handles pointer input that lands on the widget. Returns `false` when
    /// the event is outside it and should be published to the scope instead.
    pub fn handle_mouse<H: PickerHost + ?Sized>(&mut self, event: MouseEvent, host: &mut H) -> bool {
        let position = Position::new(event.column, event.row);
        if !self.surface.get().contains(position) {
            return false;
        }
        let hit = self.viewport.item_at(position);
        match event.kind {
            MouseEventKind::Moved => {
                if let Some(index) = hit {
                    self.controller.dispatch(Action::HoverOption(index), host);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = hit {
                    debug!(index, "row clicked");
                    self.controller.dispatch(Action::ClickOption(index), host);
                }
            }
            MouseEventKind::ScrollUp => {
                self.controller.dispatch(Action::ArrowUp, host);
            }
            MouseEventKind::ScrollDown => {
                self.controller.dispatch(Action::ArrowDown, host);
            }
            _ => {}
        }
        true
    }

    /// Rows needed to show everything without scrolling, capped.
    pub fn desired_height(&self) -> u16 {
        let rows = u16::try_from(self.controller.state().len()).unwrap_or(u16::MAX);
        // Borders plus the search line.
        3u16.saturating_add(rows.clamp(1, MAX_VISIBLE_ROWS)).saturating_add(self.help.height())
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.surface.set(area);
        Clear.render(area, buf);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().add_modifier(Modifier::DIM));
        if !self.label.is_empty() {
            block = block.title(Line::from(format!(" {} ", self.label)).bold());
        }
        let inner = block.inner(area);
        block.render(area, buf);

        let help_height = self.help.height().min(inner.height.saturating_sub(2));
        let [input_area, list_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(help_height),
        ])
        .areas(inner);

        let prefix = match &self.icon {
            Some(icon) => format!("{icon} "),
            None => String::new(),
        };
        let placeholder = (!self.placeholder.is_empty()).then_some(self.placeholder.as_str());
        Paragraph::new(render_editor_line(
            &prefix,
            &self.editor,
            placeholder,
            self.viewport.focused,
            input_area.width,
        ))
        .render(input_area, buf);

        self.viewport.rows = self.controller.rows();
        self.viewport.list_area = list_area;
        self.controller.after_render(&mut self.viewport);

        if self.viewport.rows.is_empty() {
            Paragraph::new(Line::from("  no matches".dim())).render(list_area, buf);
        } else {
            let selected = self.controller.state().highlighted_index();
            let adapter = RowsAdapter {
                rows: &self.viewport.rows,
            };
            self.viewport.list.render(&adapter, selected, list_area, buf);
        }

        self.help.render(help_area, buf);
    }
}

fn translate_key(event: KeyEvent) -> Key {
    let ctrl_alt = KeyModifiers::CONTROL | KeyModifiers::ALT;
    match (event.modifiers, event.code) {
        // AltGr arrives as Ctrl+Alt on some platforms and produces text.
        (mods, KeyCode::Char(ch)) if mods.contains(ctrl_alt) => Key::Char(ch),
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Key::Escape,
        (KeyModifiers::CONTROL, KeyCode::Char('p')) => Key::ArrowUp,
        (KeyModifiers::CONTROL, KeyCode::Char('n')) => Key::ArrowDown,
        (mods, KeyCode::Char(ch)) if mods.contains(KeyModifiers::CONTROL) => Key::Ctrl(ch),
        (mods, KeyCode::Char(ch)) if mods.contains(KeyModifiers::ALT) => Key::Alt(ch),
        (_, KeyCode::Char(ch)) => Key::Char(ch),
        (_, KeyCode::Up) => Key::ArrowUp,
        (_, KeyCode::Down) => Key::ArrowDown,
        (_, KeyCode::Left) => Key::ArrowLeft,
        (_, KeyCode::Right) => Key::ArrowRight,
        (_, KeyCode::PageUp) => Key::PageUp,
        (_, KeyCode::PageDown) => Key::PageDown,
        (_, KeyCode::Home) => Key::Home,
        (_, KeyCode::End) => Key::End,
        (_, KeyCode::Enter) => Key::Enter,
        (_, KeyCode::Esc) => Key::Escape,
        (_, KeyCode::Tab) => Key::Tab,
        (_, KeyCode::Backspace) => Key::Backspace,
        (_, KeyCode::Delete) => Key::Delete,
        (_, KeyCode::F(n)) => Key::Function(n),
        _ => Key::Unidentified,
    }
}
