use crate::listing::Entry;

/// One row of the render projection: the entry, its index in the full
/// list, and whether the cursor is on it.
pub struct VisibleRow<'a> {
    pub index: usize,
    pub entry: &'a Entry,
    pub is_selected: bool,
}

/// The slice of the list a single frame should draw, plus how many
/// entries are clipped off either end of the viewport.
pub struct Projection<'a> {
    pub visible_start: usize,
    pub visible_end: usize,
    pub rows: Vec<VisibleRow<'a>>,
    pub hidden_above: usize,
    pub hidden_below: usize,
}

impl Projection<'_> {
    pub fn has_more_above(&self) -> bool {
        self.hidden_above > 0
    }

    pub fn has_more_below(&self) -> bool {
        self.hidden_below > 0
    }
}

/// Cursor + scroll state for one entry list inside a fixed-height window.
///
/// Invariant after every operation (non-empty list):
/// `scroll_offset <= selected < scroll_offset + window_height`.
pub struct Navigator {
    items: Vec<Entry>,
    selected: usize,
    scroll_offset: usize,
    window_height: usize,
}

impl Navigator {
    pub fn new(items: Vec<Entry>) -> Self {
        Self {
            items,
            selected: 0,
            scroll_offset: 0,
            window_height: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn window_height(&self) -> usize {
        self.window_height
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.items.get(self.selected)
    }

    /// Replace the list wholesale and reset the cursor to the top.
    pub fn load(&mut self, items: Vec<Entry>) {
        self.items = items;
        self.selected = 0;
        self.scroll_offset = 0;
    }

    /// The renderer reports the measured window height every frame, so a
    /// terminal resize takes effect on the next draw.
    pub fn set_window_height(&mut self, height: usize) {
        self.window_height = height.max(1);
        self.ensure_visible();
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.ensure_visible();
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
            self.ensure_visible();
        }
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.page_size());
        self.ensure_visible();
    }

    pub fn page_down(&mut self) {
        if !self.is_empty() {
            self.selected = (self.selected + self.page_size()).min(self.items.len() - 1);
        }
        self.ensure_visible();
    }

    pub fn home(&mut self) {
        self.selected = 0;
        self.ensure_visible();
    }

    pub fn end(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
        self.ensure_visible();
    }

    // One row of context stays visible across a page jump.
    fn page_size(&self) -> usize {
        self.window_height.saturating_sub(1).max(1)
    }

    /// Pull the scroll offset along so the selected row stays inside the
    /// window. Idempotent: a second call with no index change is a no-op.
    fn ensure_visible(&mut self) {
        let max_offset = self.items.len().saturating_sub(self.window_height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.window_height {
            self.scroll_offset = self.selected + 1 - self.window_height;
        }
    }

    pub fn projection(&self) -> Projection<'_> {
        let visible_start = self.scroll_offset;
        let visible_end = (self.scroll_offset + self.window_height).min(self.items.len());
        let rows = self.items[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(row, entry)| {
                let index = visible_start + row;
                VisibleRow {
                    index,
                    entry,
                    is_selected: index == self.selected,
                }
            })
            .collect();

        Projection {
            visible_start,
            visible_end,
            rows,
            hidden_above: visible_start,
            hidden_below: self.items.len() - visible_end,
        }
    }
}
