/// Trait for scrollable list views with a cursor.
///
/// Movement stops at either end rather than wrapping, so scrolling past the
/// last narrative step keeps the cursor on it.
pub trait Selectable {
    /// Returns the number of items in the list
    fn len(&self) -> usize;

    /// Returns the currently selected index
    fn selected(&self) -> usize;

    /// Sets the selected index directly
    fn set_selected(&mut self, index: usize);

    /// Returns true if the list is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move the cursor to `index`, clamped to the list; returns whether it moved
    fn select(&mut self, index: usize) -> bool {
        let target = index.min(self.len().saturating_sub(1));
        let moved = target != self.selected();
        self.set_selected(target);
        moved
    }

    /// Move selection up, stopping at the first item
    fn move_up(&mut self) -> bool {
        let selected = self.selected();
        self.select(selected.saturating_sub(1))
    }

    /// Move selection down, stopping at the last item
    fn move_down(&mut self) -> bool {
        let selected = self.selected();
        self.select(selected.saturating_add(1))
    }
}
