/// Shared capability set of every row shown in a filterable list.
pub trait ListItem {
    fn title(&self) -> String;
    fn description(&self) -> String;
    fn filter_value(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    /// The query is being edited; navigation keys are suspended.
    Filtering,
    Applied,
}

/// Selectable list with a live, case-insensitive substring filter.
#[derive(Debug, Clone)]
pub struct FilterList<T> {
    items: Vec<T>,
    visible: Vec<usize>,
    query: String,
    state: FilterState,
    cursor: usize,
}

impl<T> Default for FilterList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            visible: Vec::new(),
            query: String::new(),
            state: FilterState::Unfiltered,
            cursor: 0,
        }
    }
}

impl<T: ListItem> FilterList<T> {
    #[cfg(test)]
    pub fn new(items: Vec<T>) -> Self {
        let mut list = Self::default();
        list.set_items(items);
        list
    }

    /// Replaces the rows, keeping the current query and clamping the cursor.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        let query = self.query.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                query.is_empty() || item.filter_value().to_lowercase().contains(&query)
            })
            .map(|(i, _)| i)
            .collect();
        if self.cursor >= self.visible.len() {
            self.cursor = self.visible.len().saturating_sub(1);
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn visible_items(&self) -> Vec<&T> {
        self.visible
            .iter()
            .filter_map(|&i| self.items.get(i))
            .collect()
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.visible
            .get(self.cursor)
            .and_then(|&i| self.items.get(i))
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> FilterState {
        self.state
    }

    pub fn is_filtering(&self) -> bool {
        self.state == FilterState::Filtering
    }

    pub fn start_filter(&mut self) {
        self.state = FilterState::Filtering;
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.cursor = 0;
        self.apply_filter();
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.cursor = 0;
        self.apply_filter();
    }

    /// Leaves edit mode; an empty query is the same as no filter.
    pub fn accept_filter(&mut self) {
        self.state = if self.query.is_empty() {
            FilterState::Unfiltered
        } else {
            FilterState::Applied
        };
    }

    pub fn clear_filter(&mut self) {
        self.query.clear();
        self.state = FilterState::Unfiltered;
        self.apply_filter();
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.visible.len() {
            self.cursor += 1;
        }
    }

    pub fn page_up(&mut self, page: usize) {
        self.cursor = self.cursor.saturating_sub(page.max(1));
    }

    pub fn page_down(&mut self, page: usize) {
        let last = self.visible.len().saturating_sub(1);
        self.cursor = (self.cursor + page.max(1)).min(last);
    }

    pub fn move_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_bottom(&mut self) {
        self.cursor = self.visible.len().saturating_sub(1);
    }
}
