use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// Rows drawn by [`VirtualListState`]. Every row is one terminal line tall.
pub trait VirtualListAdapter {
    fn len(&self) -> usize;
    fn render_item(&self, index: usize, area: Rect, buf: &mut Buffer, selected: bool);
}

/// Scroll offset for a list of one-line rows.
#[derive(Debug, Default)]
pub struct VirtualListState {
    first_visible: usize,
}

impl VirtualListState {
    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    /// Scrolls the minimum distance that puts `selected` inside `area`.
    pub fn ensure_visible<A: VirtualListAdapter>(
        &mut self,
        adapter: &A,
        selected: usize,
        area: Rect,
    ) {
        let len = adapter.len();
        if area.height == 0 || len == 0 {
            self.first_visible = 0;
            return;
        }
        let height = usize::from(area.height);
        let selected = selected.min(len - 1);
        if selected < self.first_visible {
            self.first_visible = selected;
        } else if selected >= self.first_visible + height {
            self.first_visible = selected + 1 - height;
        }
        // Never leave blank rows below the last item when scrolled.
        self.first_visible = self.first_visible.min(len.saturating_sub(height));
    }

    pub fn render<A: VirtualListAdapter>(
        &mut self,
        adapter: &A,
        selected: Option<usize>,
        area: Rect,
        buf: &mut Buffer,
    ) {
        match selected {
            Some(selected) => self.ensure_visible(adapter, selected, area),
            None => self.first_visible = 0,
        }
        for (offset, y) in (area.y..area.bottom()).enumerate() {
            let row = Rect::new(area.x, y, area.width, 1);
            let index = self.first_visible + offset;
            if index < adapter.len() {
                adapter.render_item(index, row, buf, Some(index) == selected);
            } else {
                for x in row.left()..row.right() {
                    buf[(x, y)].reset();
                }
            }
        }
    }

    /// Rows moved by one page key: the number of lines in `area`.
    pub fn page_step(&self, area: Rect) -> usize {
        usize::from(area.height).max(1)
    }

    /// Index of the item drawn on terminal row `y`, if any.
    pub fn item_at<A: VirtualListAdapter>(&self, adapter: &A, area: Rect, y: u16) -> Option<usize> {
        if y < area.y || y >= area.bottom() {
            return None;
        }
        let index = self.first_visible + usize::from(y - area.y);
        (index < adapter.len()).then_some(index)
    }
}
