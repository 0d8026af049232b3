//! Sticky - One tracked element and the clone that stands in for it.
//!
//! The clone is built once at registration and lives right after the source
//! (or right after the source's table). It is fixed to the viewport and
//! hidden until the sticker decides the source has scrolled out of view.
//! While the clone shows, the source is made invisible but keeps its box,
//! so the page never reflows.

use tracing::debug;

use super::config::{StickerOptions, StickyConfig};
use crate::document::Document;
use crate::error::StickyError;
use crate::types::{Edge, ElementId, ElementKind, Placement};

/// A tracked element.
#[derive(Debug, Clone)]
pub struct Sticky {
    source: ElementId,
    container: ElementId,
    clone: ElementId,
    config: StickyConfig,
}

/// All descendants of `el` of the given kind, in document order.
fn descendants_of_kind<D: Document>(doc: &D, el: ElementId, kind: ElementKind) -> Vec<ElementId> {
    let mut found = Vec::new();
    let mut stack = doc.children(el);
    stack.reverse();
    while let Some(current) = stack.pop() {
        if doc.kind(current) == Some(kind) {
            found.push(current);
        }
        let mut children = doc.children(current);
        children.reverse();
        stack.extend(children);
    }
    found
}

/// Nearest table or page root at or above `el`.
fn closest_structural<D: Document>(doc: &D, el: ElementId) -> ElementId {
    let mut current = Some(el);
    while let Some(candidate) = current {
        if matches!(doc.kind(candidate), Some(ElementKind::Table | ElementKind::Body)) {
            return candidate;
        }
        current = doc.parent(candidate);
    }
    doc.root()
}

impl Sticky {
    /// Create a sticky from a source element.
    ///
    /// Fails with [`StickyError::InvalidStructure`] if the source sits inside
    /// a table without being the table's header group. On failure nothing in
    /// the document has changed.
    pub fn create<D: Document>(
        doc: &mut D,
        source: ElementId,
        config: StickyConfig,
        options: &StickerOptions,
    ) -> Result<Self, StickyError> {
        let Some(source_kind) = doc.kind(source) else {
            return Err(StickyError::UnknownElement(source));
        };

        let (container, clone) = match config.container {
            Some(container) => {
                if !doc.contains(container) {
                    return Err(StickyError::UnknownElement(container));
                }
                (container, Self::clone_after(doc, source, source)?)
            }
            None => {
                let container = closest_structural(doc, source);
                if doc.kind(container) == Some(ElementKind::Table) {
                    if source_kind != ElementKind::TableHead {
                        return Err(StickyError::InvalidStructure {
                            element: source,
                            kind: source_kind,
                        });
                    }
                    // Clone the whole table shell so the header keeps its
                    // column structure, minus the body rows
                    (container, Self::clone_table_shell(doc, container)?)
                } else {
                    (container, Self::clone_after(doc, source, source)?)
                }
            }
        };

        let sticky = Self {
            source,
            container,
            clone,
            config,
        };
        sticky.set_up(doc, options);
        debug!(
            source = %source,
            container = %container,
            clone = %clone,
            edge = %config.edge,
            "sticky created"
        );
        Ok(sticky)
    }

    /// Clone `el` and insert the clone after `reference`.
    fn clone_after<D: Document>(
        doc: &mut D,
        el: ElementId,
        reference: ElementId,
    ) -> Result<ElementId, StickyError> {
        let clone = doc.clone_element(el)?;
        if let Err(e) = doc.insert_after(clone, reference) {
            doc.remove(clone);
            return Err(e);
        }
        Ok(clone)
    }

    fn clone_table_shell<D: Document>(
        doc: &mut D,
        table: ElementId,
    ) -> Result<ElementId, StickyError> {
        let clone = doc.clone_element(table)?;
        for section in doc.children(clone) {
            if doc.kind(section) == Some(ElementKind::TableBody) {
                doc.remove(section);
            }
        }
        if let Err(e) = doc.insert_after(clone, table) {
            doc.remove(clone);
            return Err(e);
        }
        Ok(clone)
    }

    /// Style the clone and leave it hidden.
    fn set_up<D: Document>(&self, doc: &mut D, options: &StickerOptions) {
        self.hide(doc);
        doc.add_class(self.clone, &options.clone_class);
        doc.set_fixed(self.clone, options.z_index);
        self.refresh(doc);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn source(&self) -> ElementId {
        self.source
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn clone_el(&self) -> ElementId {
        self.clone
    }

    pub fn config(&self) -> StickyConfig {
        self.config
    }

    pub fn edge(&self) -> Edge {
        self.config.edge
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Copy the live header cell widths onto the clone's cells.
    ///
    /// A header outside its table cannot size its columns from the body
    /// rows, so the widths are re-applied whenever layout may have changed.
    /// No-op for anything but table clones.
    pub fn refresh<D: Document>(&self, doc: &mut D) {
        if doc.kind(self.clone) != Some(ElementKind::Table) {
            return;
        }

        let widths: Vec<f32> = descendants_of_kind(doc, self.source, ElementKind::HeaderCell)
            .into_iter()
            .map(|cell| doc.width(cell))
            .collect();

        let clone_cells = descendants_of_kind(doc, self.clone, ElementKind::HeaderCell);
        for (cell, width) in clone_cells.into_iter().zip(widths) {
            doc.set_width(cell, width);
        }
    }

    /// Show the clone `offset` cells from the given viewport edge, lined up
    /// horizontally with the source, and hide the source's rendering.
    pub fn show_at<D: Document>(&self, doc: &mut D, edge: Edge, offset: f32) {
        let placement = Placement {
            edge,
            offset,
            left: doc.offset(self.source).left,
            width: doc.width(self.source),
        };
        doc.place(self.clone, placement);
        doc.set_shown(self.clone, true);
        doc.set_visible(self.source, false);
    }

    /// Hide the clone and restore the source.
    pub fn hide<D: Document>(&self, doc: &mut D) {
        doc.set_shown(self.clone, false);
        doc.set_visible(self.source, true);
    }

    /// Hide the clone and remove it from the document.
    pub fn tear_down<D: Document>(&self, doc: &mut D) {
        self.hide(doc);
        doc.remove(self.clone);
        debug!(source = %self.source, "sticky torn down");
    }

    /// Outer height of the logical container.
    pub fn container_height<D: Document>(&self, doc: &D) -> f32 {
        doc.outer_height(self.container)
    }

    /// Outer height of the clone.
    pub fn clone_height<D: Document>(&self, doc: &D) -> f32 {
        doc.outer_height(self.clone)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Page;

    fn options() -> StickerOptions {
        StickerOptions::default()
    }

    fn table_page() -> (Page, crate::document::TableHandle) {
        let mut page = Page::new(80, 10);
        let body = page.body();
        page.sized_block(body, "intro", 4.0).unwrap();
        let handle = page
            .table(
                body,
                &["ID", "Name"],
                &[vec!["1", "Alice Wonderland"], vec!["2", "Bob"], vec!["3", "Carol"]],
            )
            .unwrap();
        page.sized_block(body, "outro", 40.0).unwrap();
        (page, handle)
    }

    #[test]
    fn test_block_clone_inserted_after_source() {
        let mut page = Page::new(40, 10);
        let body = page.body();
        let source = page.sized_block(body, "header", 2.0).unwrap();
        let after = page.block(body, "after").unwrap();

        let sticky = Sticky::create(&mut page, source, StickyConfig::top(), &options()).unwrap();

        assert_eq!(sticky.container(), body);
        assert_eq!(page.children(body), vec![source, sticky.clone_el(), after]);
        assert!(!page.is_shown(sticky.clone_el()));
        assert!(page.is_visible(source));
        assert!(page.has_class(sticky.clone_el(), "keepinsight-clone"));
        assert_eq!(page.z_index(sticky.clone_el()), 808);
        assert_eq!(sticky.clone_height(&page), 2.0);
    }

    #[test]
    fn test_table_clone_has_no_body_rows() {
        let (mut page, handle) = table_page();
        let sticky =
            Sticky::create(&mut page, handle.head, StickyConfig::top(), &options()).unwrap();

        assert_eq!(sticky.container(), handle.table);
        let clone = sticky.clone_el();
        assert_eq!(page.kind(clone), Some(ElementKind::Table));
        let children = page.children(page.body());
        let table_pos = children.iter().position(|&el| el == handle.table).unwrap();
        assert_eq!(children[table_pos + 1], clone);

        let sections: Vec<_> = page
            .children(clone)
            .into_iter()
            .filter_map(|el| page.kind(el))
            .collect();
        assert_eq!(sections, vec![ElementKind::TableHead]);
        assert_eq!(sticky.clone_height(&page), 1.0);
        assert_eq!(sticky.container_height(&page), 4.0);
    }

    #[test]
    fn test_refresh_copies_column_widths() {
        let (mut page, handle) = table_page();
        let sticky =
            Sticky::create(&mut page, handle.head, StickyConfig::top(), &options()).unwrap();

        let clone_cells = descendants_of_kind(&page, sticky.clone_el(), ElementKind::HeaderCell);
        assert_eq!(clone_cells.len(), 2);
        for (source_cell, clone_cell) in handle.header_cells.iter().zip(&clone_cells) {
            assert_eq!(page.width(*source_cell), page.width(*clone_cell));
        }
        assert_eq!(page.width(clone_cells[1]), 18.0);
    }

    #[test]
    fn test_refresh_follows_content_changes() {
        let (mut page, handle) = table_page();
        let sticky =
            Sticky::create(&mut page, handle.head, StickyConfig::top(), &options()).unwrap();
        let clone_cells = descendants_of_kind(&page, sticky.clone_el(), ElementKind::HeaderCell);

        let cells = descendants_of_kind(&page, handle.rows[1], ElementKind::DataCell);
        page.set_text(cells[1], "Bartholomew Fitzgerald-Smith");
        sticky.refresh(&mut page);

        assert_eq!(page.width(handle.header_cells[1]), 30.0);
        assert_eq!(page.width(clone_cells[1]), 30.0);
    }

    #[test]
    fn test_non_head_table_part_is_rejected() {
        let (mut page, handle) = table_page();
        let before = page.len();
        let cell = handle.header_cells[0];

        let result = Sticky::create(&mut page, cell, StickyConfig::top(), &options());
        assert!(matches!(
            result,
            Err(StickyError::InvalidStructure { element, kind: ElementKind::HeaderCell })
                if element == cell
        ));
        assert!(matches!(
            Sticky::create(&mut page, handle.table, StickyConfig::top(), &options()),
            Err(StickyError::InvalidStructure { kind: ElementKind::Table, .. })
        ));
        assert_eq!(page.len(), before);
    }

    #[test]
    fn test_explicit_container_skips_table_check() {
        let (mut page, handle) = table_page();
        let config = StickyConfig::top().with_container(handle.table);
        let row = handle.rows[0];

        let sticky = Sticky::create(&mut page, row, config, &options()).unwrap();
        assert_eq!(sticky.container(), handle.table);
        assert_eq!(page.kind(sticky.clone_el()), Some(ElementKind::TableRow));
        assert_eq!(page.parent(sticky.clone_el()), Some(handle.body));
    }

    #[test]
    fn test_unknown_source() {
        let mut page = Page::new(40, 10);
        let missing = ElementId(99);
        assert!(matches!(
            Sticky::create(&mut page, missing, StickyConfig::top(), &options()),
            Err(StickyError::UnknownElement(el)) if el == missing
        ));
    }

    #[test]
    fn test_root_cannot_stick() {
        let mut page = Page::new(40, 10);
        let body = page.body();
        let before = page.len();
        assert!(matches!(
            Sticky::create(&mut page, body, StickyConfig::top(), &options()),
            Err(StickyError::Detached(el)) if el == body
        ));
        assert_eq!(page.len(), before);
    }

    #[test]
    fn test_show_hide_and_tear_down() {
        let mut page = Page::new(40, 10);
        let body = page.body();
        page.sized_block(body, "spacer", 3.0).unwrap();
        let source = page.sized_block(body, "header", 2.0).unwrap();
        page.sized_block(body, "rest", 50.0).unwrap();
        let before = page.len();

        let sticky = Sticky::create(&mut page, source, StickyConfig::top(), &options()).unwrap();
        page.set_scroll_top(10.0);

        sticky.show_at(&mut page, Edge::Top, 4.0);
        assert!(page.is_shown(sticky.clone_el()));
        assert!(!page.is_visible(source));
        let placement = page.placement(sticky.clone_el()).unwrap();
        assert_eq!(placement.offset, 4.0);
        assert_eq!(placement.width, 40.0);
        assert_eq!(page.offset(sticky.clone_el()).top, 14.0);

        sticky.hide(&mut page);
        assert!(!page.is_shown(sticky.clone_el()));
        assert!(page.is_visible(source));

        sticky.show_at(&mut page, Edge::Top, 0.0);
        sticky.tear_down(&mut page);
        assert_eq!(page.kind(sticky.clone_el()), None);
        assert!(page.is_visible(source));
        assert_eq!(page.len(), before);
    }
}
