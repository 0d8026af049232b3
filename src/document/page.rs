//! Page - In-memory document.
//!
//! Elements are indices into parallel arrays, allocated from a free-index
//! pool the way the component registry does it:
//!
//! ```text
//! Index 0: Body  (parent=None, children=[1, 4])
//! Index 1: Table (parent=0,    children=[2, 3])
//! Index 2: THead (parent=1,    flags=NONE)
//! ```
//!
//! Layout is computed with Taffy on demand and cached until something that
//! affects flow changes. The viewport (scroll position and terminal size)
//! lives in signals so hosts can read it from reactive code.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use spark_signals::{signal, Signal};
use tracing::warn;

use super::layout::{compute_page_layout, PageLayout};
use super::timers::IntervalTimers;
use super::Document;
use crate::error::StickyError;
use crate::types::{
    Edge, ElementFlags, ElementId, ElementKind, ListenerId, Placement, Point, TimerId,
};

/// Elements created by [`Page::table`].
#[derive(Debug, Clone)]
pub struct TableHandle {
    pub table: ElementId,
    pub head: ElementId,
    pub body: ElementId,
    pub header_cells: Vec<ElementId>,
    pub rows: Vec<ElementId>,
}

/// In-memory document with a scrollable viewport.
pub struct Page {
    // Parallel arrays, one cell per element index
    pub(super) kinds: Vec<ElementKind>,
    pub(super) parents: Vec<Option<usize>>,
    pub(super) child_lists: Vec<Vec<usize>>,
    pub(super) texts: Vec<String>,
    pub(super) heights: Vec<Option<f32>>,
    pub(super) widths: Vec<Option<f32>>,
    pub(super) margin_tops: Vec<f32>,
    pub(super) flags: Vec<ElementFlags>,
    pub(super) placements: Vec<Option<Placement>>,
    z_indices: Vec<i32>,
    classes: Vec<Vec<String>>,
    allocated: Vec<bool>,
    free_indices: Vec<usize>,
    pub(super) root: usize,

    // Viewport
    scroll_top: Signal<f32>,
    viewport: Signal<(u16, u16)>,

    // Scheduling
    timers: IntervalTimers,
    resize_listeners: Vec<ListenerId>,
    next_listener: u64,

    layout_cache: RefCell<Option<Rc<PageLayout>>>,
}

impl Page {
    /// Create an empty page (just a body) with the given viewport size.
    pub fn new(viewport_width: u16, viewport_height: u16) -> Self {
        let mut page = Self {
            kinds: Vec::new(),
            parents: Vec::new(),
            child_lists: Vec::new(),
            texts: Vec::new(),
            heights: Vec::new(),
            widths: Vec::new(),
            margin_tops: Vec::new(),
            flags: Vec::new(),
            placements: Vec::new(),
            z_indices: Vec::new(),
            classes: Vec::new(),
            allocated: Vec::new(),
            free_indices: Vec::new(),
            root: 0,
            scroll_top: signal(0.0),
            viewport: signal((viewport_width, viewport_height)),
            timers: IntervalTimers::new(),
            resize_listeners: Vec::new(),
            next_listener: 0,
            layout_cache: RefCell::new(None),
        };
        page.root = page.allocate(ElementKind::Body, String::new());
        page
    }

    // =========================================================================
    // Index Allocation
    // =========================================================================

    fn allocate(&mut self, kind: ElementKind, text: String) -> usize {
        if let Some(index) = self.free_indices.pop() {
            self.kinds[index] = kind;
            self.parents[index] = None;
            self.child_lists[index].clear();
            self.texts[index] = text;
            self.heights[index] = None;
            self.widths[index] = None;
            self.margin_tops[index] = 0.0;
            self.flags[index] = ElementFlags::NONE;
            self.placements[index] = None;
            self.z_indices[index] = 0;
            self.classes[index].clear();
            self.allocated[index] = true;
            index
        } else {
            self.kinds.push(kind);
            self.parents.push(None);
            self.child_lists.push(Vec::new());
            self.texts.push(text);
            self.heights.push(None);
            self.widths.push(None);
            self.margin_tops.push(0.0);
            self.flags.push(ElementFlags::NONE);
            self.placements.push(None);
            self.z_indices.push(0);
            self.classes.push(Vec::new());
            self.allocated.push(true);
            self.kinds.len() - 1
        }
    }

    /// Release an index and all of its children back to the pool.
    fn release(&mut self, index: usize) {
        let children = std::mem::take(&mut self.child_lists[index]);
        for child in children {
            self.release(child);
        }
        self.allocated[index] = false;
        self.parents[index] = None;
        self.texts[index].clear();
        self.classes[index].clear();
        self.free_indices.push(index);
    }

    fn detach(&mut self, index: usize) {
        if let Some(parent) = self.parents[index].take() {
            self.child_lists[parent].retain(|&child| child != index);
        }
    }

    #[inline]
    pub(super) fn is_allocated(&self, index: usize) -> bool {
        self.allocated.get(index).copied().unwrap_or(false)
    }

    fn check(&self, el: ElementId) -> Result<usize, StickyError> {
        if self.is_allocated(el.0) {
            Ok(el.0)
        } else {
            Err(StickyError::UnknownElement(el))
        }
    }

    /// Number of live elements, detached ones included.
    pub fn len(&self) -> usize {
        self.allocated.iter().filter(|&&live| live).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacity of the parallel arrays.
    pub(super) fn capacity(&self) -> usize {
        self.kinds.len()
    }

    // =========================================================================
    // Building
    // =========================================================================

    /// Append a new element as the last child of `parent`.
    pub fn append(
        &mut self,
        parent: ElementId,
        kind: ElementKind,
        text: &str,
    ) -> Result<ElementId, StickyError> {
        let parent_index = self.check(parent)?;
        let index = self.allocate(kind, text.to_string());
        self.parents[index] = Some(parent_index);
        self.child_lists[parent_index].push(index);
        self.invalidate();
        Ok(ElementId(index))
    }

    /// Append a text block whose height follows its line count.
    pub fn block(&mut self, parent: ElementId, text: &str) -> Result<ElementId, StickyError> {
        self.append(parent, ElementKind::Block, text)
    }

    /// Append a block with an explicit height.
    pub fn sized_block(
        &mut self,
        parent: ElementId,
        text: &str,
        height: f32,
    ) -> Result<ElementId, StickyError> {
        let el = self.block(parent, text)?;
        self.set_height(el, Some(height));
        Ok(el)
    }

    /// Append a table with one header row and the given body rows.
    pub fn table(
        &mut self,
        parent: ElementId,
        headers: &[&str],
        rows: &[Vec<&str>],
    ) -> Result<TableHandle, StickyError> {
        let table = self.append(parent, ElementKind::Table, "")?;
        let head = self.append(table, ElementKind::TableHead, "")?;
        let header_row = self.append(head, ElementKind::TableRow, "")?;
        let mut header_cells = Vec::with_capacity(headers.len());
        for header in headers {
            header_cells.push(self.append(header_row, ElementKind::HeaderCell, header)?);
        }

        let body = self.append(table, ElementKind::TableBody, "")?;
        let mut body_rows = Vec::with_capacity(rows.len());
        for row in rows {
            let row_el = self.append(body, ElementKind::TableRow, "")?;
            for value in row {
                self.append(row_el, ElementKind::DataCell, value)?;
            }
            body_rows.push(row_el);
        }

        Ok(TableHandle {
            table,
            head,
            body,
            header_cells,
            rows: body_rows,
        })
    }

    pub fn set_text(&mut self, el: ElementId, text: &str) {
        if self.is_allocated(el.0) {
            self.texts[el.0] = text.to_string();
            self.invalidate();
        }
    }

    /// Explicit height, `None` to size from content.
    pub fn set_height(&mut self, el: ElementId, height: Option<f32>) {
        if self.is_allocated(el.0) {
            self.heights[el.0] = height;
            self.invalidate();
        }
    }

    pub fn set_margin_top(&mut self, el: ElementId, margin: f32) {
        if self.is_allocated(el.0) {
            self.margin_tops[el.0] = margin;
            self.invalidate();
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn body(&self) -> ElementId {
        ElementId(self.root)
    }

    pub fn text(&self, el: ElementId) -> &str {
        if self.is_allocated(el.0) { &self.texts[el.0] } else { "" }
    }

    pub fn flags(&self, el: ElementId) -> ElementFlags {
        if self.is_allocated(el.0) { self.flags[el.0] } else { ElementFlags::NONE }
    }

    pub fn is_shown(&self, el: ElementId) -> bool {
        self.is_allocated(el.0) && !self.flags[el.0].contains(ElementFlags::HIDDEN)
    }

    pub fn is_visible(&self, el: ElementId) -> bool {
        self.is_allocated(el.0) && !self.flags[el.0].contains(ElementFlags::INVISIBLE)
    }

    pub fn placement(&self, el: ElementId) -> Option<Placement> {
        if self.is_allocated(el.0) { self.placements[el.0] } else { None }
    }

    pub fn z_index(&self, el: ElementId) -> i32 {
        if self.is_allocated(el.0) { self.z_indices[el.0] } else { 0 }
    }

    pub fn margin_top(&self, el: ElementId) -> f32 {
        if self.is_allocated(el.0) { self.margin_tops[el.0] } else { 0.0 }
    }

    pub fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.is_allocated(el.0) && self.classes[el.0].iter().any(|c| c == class)
    }

    /// Attached elements carrying `class`, in document order.
    pub fn find_by_class(&self, class: &str) -> Vec<ElementId> {
        self.descendants(self.body())
            .into_iter()
            .filter(|&el| self.has_class(el, class))
            .collect()
    }

    /// The element and everything below it, in document order.
    pub fn descendants(&self, el: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if !self.is_allocated(el.0) {
            return out;
        }
        let mut stack = vec![el.0];
        while let Some(index) = stack.pop() {
            out.push(ElementId(index));
            stack.extend(self.child_lists[index].iter().rev());
        }
        out
    }

    /// Is the element reachable from the body.
    pub fn is_attached(&self, el: ElementId) -> bool {
        let mut current = Some(el.0);
        while let Some(index) = current {
            if !self.is_allocated(index) {
                return false;
            }
            if index == self.root {
                return true;
            }
            current = self.parents[index];
        }
        false
    }

    // =========================================================================
    // Layout
    // =========================================================================

    fn invalidate(&self) {
        self.layout_cache.borrow_mut().take();
    }

    /// Current layout, recomputed if anything changed since the last call.
    pub(crate) fn layout(&self) -> Rc<PageLayout> {
        if let Some(layout) = self.layout_cache.borrow().as_ref() {
            return Rc::clone(layout);
        }
        let layout = match compute_page_layout(self) {
            Ok(layout) => Rc::new(layout),
            Err(e) => {
                warn!("page layout failed: {:?}", e);
                Rc::new(PageLayout::default())
            }
        };
        *self.layout_cache.borrow_mut() = Some(Rc::clone(&layout));
        layout
    }

    /// Height of the laid-out body.
    pub fn content_height(&self) -> f32 {
        self.layout()
            .get(self.root)
            .map(|b| b.height)
            .unwrap_or(0.0)
    }

    /// Nearest fixed, placed element at or above `index`.
    fn fixed_anchor(&self, index: usize) -> Option<(usize, Placement)> {
        let mut current = Some(index);
        while let Some(i) = current {
            if self.flags[i].contains(ElementFlags::FIXED) {
                if let Some(placement) = self.placements[i] {
                    return Some((i, placement));
                }
            }
            current = self.parents[i];
        }
        None
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    pub fn viewport_width(&self) -> u16 {
        self.viewport.get().0
    }

    pub fn viewport_size(&self) -> (u16, u16) {
        self.viewport.get()
    }

    pub fn max_scroll_top(&self) -> f32 {
        (self.content_height() - self.viewport_height()).max(0.0)
    }

    /// Scroll to `top`, clamped to the scrollable range. Returns the value
    /// actually applied.
    pub fn set_scroll_top(&mut self, top: f32) -> f32 {
        let clamped = top.clamp(0.0, self.max_scroll_top());
        if clamped != self.scroll_top.get() {
            self.scroll_top.set(clamped);
        }
        clamped
    }

    /// Scroll by a delta.
    ///
    /// Returns `true` if scrolling occurred, `false` if already at boundary.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        let current = self.scroll_top.get();
        self.set_scroll_top(current + delta) != current
    }

    /// Resize the viewport. Returns the resize listeners to notify (empty if
    /// the size did not change).
    pub fn set_viewport_size(&mut self, width: u16, height: u16) -> Vec<ListenerId> {
        if self.viewport.get() == (width, height) {
            return Vec::new();
        }
        self.viewport.set((width, height));
        self.invalidate();
        // Shrinking content may leave the scroll position out of range
        let top = self.scroll_top.get();
        self.set_scroll_top(top);
        self.resize_listeners.clone()
    }

    // =========================================================================
    // Scheduling
    // =========================================================================

    /// Advance the timer clock. Returns the timers that fired.
    pub fn advance(&mut self, delta: Duration) -> Vec<TimerId> {
        self.timers.advance(delta)
    }

    /// Time until the next timer fires.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    pub fn active_timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn resize_listener_count(&self) -> usize {
        self.resize_listeners.len()
    }
}

// =============================================================================
// Document Implementation
// =============================================================================

impl Document for Page {
    fn root(&self) -> ElementId {
        ElementId(self.root)
    }

    fn kind(&self, el: ElementId) -> Option<ElementKind> {
        self.is_allocated(el.0).then(|| self.kinds[el.0])
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        if !self.is_allocated(el.0) {
            return None;
        }
        self.parents[el.0].map(ElementId)
    }

    fn children(&self, el: ElementId) -> Vec<ElementId> {
        if !self.is_allocated(el.0) {
            return Vec::new();
        }
        self.child_lists[el.0].iter().copied().map(ElementId).collect()
    }

    fn offset(&self, el: ElementId) -> Point {
        if !self.is_allocated(el.0) {
            return Point::ZERO;
        }
        let layout = self.layout();
        let Some(own) = layout.get(el.0) else {
            return Point::ZERO;
        };

        match self.fixed_anchor(el.0) {
            None => Point::new(own.x, own.y),
            Some((anchor, placement)) => {
                let Some(anchor_box) = layout.get(anchor) else {
                    return Point::ZERO;
                };
                let scroll_top = self.scroll_top.get();
                let anchor_top = match placement.edge {
                    Edge::Top => scroll_top + placement.offset,
                    Edge::Bottom => {
                        scroll_top + self.viewport_height() - placement.offset - anchor_box.height
                    }
                };
                Point::new(
                    placement.left + (own.x - anchor_box.x),
                    anchor_top + (own.y - anchor_box.y),
                )
            }
        }
    }

    fn width(&self, el: ElementId) -> f32 {
        if !self.is_allocated(el.0) {
            return 0.0;
        }
        self.layout().get(el.0).map(|b| b.width).unwrap_or(0.0)
    }

    fn outer_height(&self, el: ElementId) -> f32 {
        if !self.is_allocated(el.0) {
            return 0.0;
        }
        self.layout().get(el.0).map(|b| b.height).unwrap_or(0.0)
    }

    fn clone_element(&mut self, el: ElementId) -> Result<ElementId, StickyError> {
        let source = self.check(el)?;
        let index = self.allocate(self.kinds[source], self.texts[source].clone());
        self.heights[index] = self.heights[source];
        self.widths[index] = self.widths[source];
        self.margin_tops[index] = self.margin_tops[source];
        self.flags[index] = self.flags[source];
        self.placements[index] = self.placements[source];
        self.z_indices[index] = self.z_indices[source];
        self.classes[index] = self.classes[source].clone();

        let children = self.child_lists[source].clone();
        for child in children {
            let child_clone = self.clone_element(ElementId(child))?;
            self.parents[child_clone.0] = Some(index);
            self.child_lists[index].push(child_clone.0);
        }
        Ok(ElementId(index))
    }

    fn insert_after(&mut self, el: ElementId, reference: ElementId) -> Result<(), StickyError> {
        let index = self.check(el)?;
        let reference_index = self.check(reference)?;
        let parent = self.parents[reference_index].ok_or(StickyError::Detached(reference))?;

        self.detach(index);
        let position = self.child_lists[parent]
            .iter()
            .position(|&child| child == reference_index)
            .map_or(self.child_lists[parent].len(), |p| p + 1);
        self.child_lists[parent].insert(position, index);
        self.parents[index] = Some(parent);
        self.invalidate();
        Ok(())
    }

    fn remove(&mut self, el: ElementId) {
        if !self.is_allocated(el.0) || el.0 == self.root {
            return;
        }
        self.detach(el.0);
        self.release(el.0);
        self.invalidate();
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        if self.is_allocated(el.0) && !self.has_class(el, class) {
            self.classes[el.0].push(class.to_string());
        }
    }

    fn set_shown(&mut self, el: ElementId, shown: bool) {
        if !self.is_allocated(el.0) {
            return;
        }
        let flags = &mut self.flags[el.0];
        if flags.contains(ElementFlags::HIDDEN) != shown {
            return;
        }
        flags.set(ElementFlags::HIDDEN, !shown);
        // Fixed elements are out of flow, so toggling them moves nothing
        if !flags.contains(ElementFlags::FIXED) {
            self.invalidate();
        }
    }

    fn set_visible(&mut self, el: ElementId, visible: bool) {
        if self.is_allocated(el.0) {
            self.flags[el.0].set(ElementFlags::INVISIBLE, !visible);
        }
    }

    fn set_fixed(&mut self, el: ElementId, z_index: i32) {
        if !self.is_allocated(el.0) {
            return;
        }
        self.flags[el.0].insert(ElementFlags::FIXED);
        self.margin_tops[el.0] = 0.0;
        self.z_indices[el.0] = z_index;
        self.invalidate();
    }

    fn place(&mut self, el: ElementId, placement: Placement) {
        if !self.is_allocated(el.0) {
            return;
        }
        let width_changed = self.placements[el.0].map(|p| p.width) != Some(placement.width);
        self.placements[el.0] = Some(placement);
        if width_changed {
            self.invalidate();
        }
    }

    fn set_width(&mut self, el: ElementId, width: f32) {
        if self.is_allocated(el.0) {
            self.widths[el.0] = Some(width);
            self.invalidate();
        }
    }

    fn scroll_top(&self) -> f32 {
        self.scroll_top.get()
    }

    fn viewport_height(&self) -> f32 {
        f32::from(self.viewport.get().1)
    }

    fn set_interval(&mut self, period: Duration) -> TimerId {
        self.timers.set_interval(period)
    }

    fn clear_interval(&mut self, id: TimerId) {
        self.timers.clear_interval(id);
    }

    fn subscribe_resize(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.resize_listeners.push(id);
        id
    }

    fn unsubscribe_resize(&mut self, id: ListenerId) {
        self.resize_listeners.retain(|&listener| listener != id);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tall_page() -> (Page, ElementId, ElementId) {
        let mut page = Page::new(40, 10);
        let body = page.body();
        let top = page.sized_block(body, "top", 5.0).unwrap();
        let middle = page.sized_block(body, "middle", 3.0).unwrap();
        page.sized_block(body, "rest", 92.0).unwrap();
        (page, top, middle)
    }

    #[test]
    fn test_block_flow() {
        let (page, top, middle) = tall_page();

        assert_eq!(page.offset(top), Point::new(0.0, 0.0));
        assert_eq!(page.offset(middle), Point::new(0.0, 5.0));
        assert_eq!(page.outer_height(middle), 3.0);
        assert_eq!(page.width(middle), 40.0);
        assert_eq!(page.content_height(), 100.0);
    }

    #[test]
    fn test_text_block_height_follows_lines() {
        let mut page = Page::new(40, 10);
        let body = page.body();
        let el = page.block(body, "one\ntwo\nthree").unwrap();
        assert_eq!(page.outer_height(el), 3.0);
    }

    #[test]
    fn test_scroll_clamping() {
        let (mut page, _, _) = tall_page();

        assert_eq!(page.max_scroll_top(), 90.0);
        assert_eq!(page.set_scroll_top(50.0), 50.0);
        assert_eq!(page.set_scroll_top(500.0), 90.0);
        assert_eq!(page.set_scroll_top(-3.0), 0.0);

        assert!(!page.scroll_by(-1.0));
        assert!(page.scroll_by(4.0));
        assert_eq!(page.scroll_top(), 4.0);
        assert_eq!(page.scroll_bottom(), 14.0);
    }

    #[test]
    fn test_margin_top_moves_flow() {
        let (mut page, _, middle) = tall_page();
        page.set_margin_top(middle, 2.0);
        assert_eq!(page.offset(middle).top, 7.0);
    }

    #[test]
    fn test_clone_and_insert_after() {
        let (mut page, top, middle) = tall_page();
        let before = page.len();

        let clone = page.clone_element(middle).unwrap();
        assert_eq!(page.parent(clone), None);
        assert!(!page.is_attached(clone));
        assert_eq!(page.text(clone), "middle");

        page.insert_after(clone, top).unwrap();
        assert_eq!(page.parent(clone), Some(page.body()));
        assert_eq!(page.children(page.body())[1], clone);
        assert_eq!(page.len(), before + 1);

        page.remove(clone);
        assert_eq!(page.len(), before);
        assert_eq!(page.children(page.body()).len(), 3);
    }

    #[test]
    fn test_insert_after_detached_reference() {
        let (mut page, _, middle) = tall_page();
        let clone = page.clone_element(middle).unwrap();
        let other = page.clone_element(middle).unwrap();
        assert!(matches!(
            page.insert_after(clone, other),
            Err(StickyError::Detached(el)) if el == other
        ));
    }

    #[test]
    fn test_remove_releases_subtree() {
        let mut page = Page::new(40, 10);
        let body = page.body();
        let handle = page.table(body, &["a", "b"], &[vec!["1", "2"]]).unwrap();
        assert_eq!(page.len(), 10);

        page.remove(handle.table);
        assert_eq!(page.len(), 1);
        assert_eq!(page.kind(handle.head), None);

        // Freed indices are reused
        let block = page.block(body, "x").unwrap();
        assert!(block.0 < 10);
    }

    #[test]
    fn test_hidden_block_takes_no_space() {
        let (mut page, top, middle) = tall_page();
        page.set_shown(top, false);
        assert_eq!(page.offset(middle).top, 0.0);

        page.set_shown(top, true);
        page.set_visible(top, false);
        assert_eq!(page.offset(middle).top, 5.0);
        assert!(!page.is_visible(top));
    }

    #[test]
    fn test_table_columns_line_up() {
        let mut page = Page::new(80, 10);
        let body = page.body();
        let handle = page
            .table(body, &["ID", "Name"], &[vec!["1", "Alice Wonderland"], vec!["2", "Bob"]])
            .unwrap();

        assert_eq!(page.width(handle.header_cells[0]), 4.0);
        assert_eq!(page.width(handle.header_cells[1]), 18.0);
        assert_eq!(page.width(handle.head), 22.0);
        assert_eq!(page.outer_height(handle.table), 3.0);
        assert_eq!(page.offset(handle.rows[1]).top, 2.0);
    }

    #[test]
    fn test_fixed_element_leaves_flow() {
        let (mut page, top, middle) = tall_page();
        let clone = page.clone_element(top).unwrap();
        page.set_fixed(clone, 808);
        page.insert_after(clone, top).unwrap();

        // Flow below is not pushed down by the fixed clone
        assert_eq!(page.offset(middle).top, 5.0);
        assert_eq!(page.outer_height(clone), 5.0);

        page.set_scroll_top(20.0);
        page.place(clone, Placement { edge: Edge::Top, offset: 2.0, left: 1.0, width: 40.0 });
        assert_eq!(page.offset(clone), Point::new(1.0, 22.0));

        page.place(clone, Placement { edge: Edge::Bottom, offset: 0.0, left: 0.0, width: 40.0 });
        assert_eq!(page.offset(clone).top, 20.0 + 10.0 - 5.0);
    }

    #[test]
    fn test_resize_notifies_listeners() {
        let (mut page, _, _) = tall_page();
        let listener = page.subscribe_resize();

        assert_eq!(page.set_viewport_size(40, 10), Vec::new());
        assert_eq!(page.set_viewport_size(60, 20), vec![listener]);
        assert_eq!(page.max_scroll_top(), 80.0);

        page.unsubscribe_resize(listener);
        assert_eq!(page.resize_listener_count(), 0);
        assert!(page.set_viewport_size(30, 20).is_empty());
    }

    #[test]
    fn test_classes() {
        let (mut page, top, _) = tall_page();
        page.add_class(top, "keepinsight-clone");
        page.add_class(top, "keepinsight-clone");
        assert!(page.has_class(top, "keepinsight-clone"));
        assert_eq!(page.find_by_class("keepinsight-clone"), vec![top]);
    }
}
