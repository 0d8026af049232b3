//! Page Layout - Taffy bridge for [`Page`](super::Page).
//!
//! Converts the page's element arrays to Taffy styles, runs layout
//! computation, and extracts absolute document boxes.
//!
//! - Body, blocks and table sections are flex columns
//! - Rows are flex rows of fixed-width cells
//! - Fixed elements are absolutely positioned (out of flow) and are laid out
//!   even while hidden, so their height can be measured before they show
//!
//! Tables get a sizing pre-pass: each column is as wide as its widest cell
//! (text width plus one cell of padding on each side, or the cell's explicit
//! width). A header cloned out of its table only sees its own cells, which is
//! why sticky table headers copy the live column widths onto their clones.

use std::collections::HashMap;

use taffy::{
    AlignSelf, AvailableSpace, Dimension, Display, FlexDirection, LengthPercentageAuto, NodeId,
    Position, Rect, Size, Style, TaffyError, TaffyTree,
};
use unicode_width::UnicodeWidthStr;

use super::page::Page;
use crate::types::{ElementFlags, ElementKind};

/// Horizontal padding around cell text (both sides together).
const CELL_PADDING: f32 = 2.0;

/// Absolute document box of one element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Computed boxes, indexed like the page's element arrays.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    boxes: Vec<Option<LayoutBox>>,
}

impl PageLayout {
    /// Box for an element index, `None` if it was not laid out (detached
    /// or hidden in flow).
    pub fn get(&self, index: usize) -> Option<LayoutBox> {
        self.boxes.get(index).copied().flatten()
    }
}

// =============================================================================
// TEXT MEASUREMENT
// =============================================================================

/// Display width of the widest line.
fn text_width(text: &str) -> f32 {
    text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0) as f32
}

fn text_lines(text: &str) -> f32 {
    text.lines().count() as f32
}

// =============================================================================
// TABLE SIZING
// =============================================================================

/// Rows of a table, in order, looking through header/body sections.
fn table_rows(page: &Page, table: usize) -> Vec<usize> {
    let mut rows = Vec::new();
    for &child in &page.child_lists[table] {
        match page.kinds[child] {
            ElementKind::TableRow => rows.push(child),
            kind if kind.is_table_section() => rows.extend(
                page.child_lists[child]
                    .iter()
                    .copied()
                    .filter(|&row| page.kinds[row] == ElementKind::TableRow),
            ),
            _ => {}
        }
    }
    rows
}

fn row_cells(page: &Page, row: usize) -> impl Iterator<Item = usize> + '_ {
    page.child_lists[row]
        .iter()
        .copied()
        .filter(|&cell| page.kinds[cell].is_cell())
}

/// Resolve the width of every table cell on the page.
fn size_tables(page: &Page) -> HashMap<usize, f32> {
    let mut cell_widths = HashMap::new();

    for table in 0..page.capacity() {
        if !page.is_allocated(table) || page.kinds[table] != ElementKind::Table {
            continue;
        }

        let rows = table_rows(page, table);
        let mut columns: Vec<f32> = Vec::new();
        for &row in &rows {
            for (column, cell) in row_cells(page, row).enumerate() {
                let width = page.widths[cell]
                    .unwrap_or_else(|| text_width(&page.texts[cell]) + CELL_PADDING);
                if column == columns.len() {
                    columns.push(width);
                } else {
                    columns[column] = columns[column].max(width);
                }
            }
        }

        for &row in &rows {
            for (column, cell) in row_cells(page, row).enumerate() {
                cell_widths.insert(cell, columns[column]);
            }
        }
    }

    cell_widths
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn build_style(page: &Page, idx: usize, cell_widths: &HashMap<usize, f32>) -> Style {
    let kind = page.kinds[idx];
    let flags = page.flags[idx];

    let mut style = Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        flex_shrink: 0.0,
        margin: Rect {
            top: LengthPercentageAuto::Length(page.margin_tops[idx]),
            right: LengthPercentageAuto::Length(0.0),
            bottom: LengthPercentageAuto::Length(0.0),
            left: LengthPercentageAuto::Length(0.0),
        },
        ..Default::default()
    };

    match kind {
        ElementKind::Body => {
            style.size.width = Dimension::Length(f32::from(page.viewport_width()));
        }
        ElementKind::Block => {
            let height = match page.heights[idx] {
                Some(height) => Some(height),
                None if page.child_lists[idx].is_empty() => Some(text_lines(&page.texts[idx])),
                None => None,
            };
            if let Some(height) = height {
                style.size.height = Dimension::Length(height);
            }
        }
        ElementKind::Table => {
            // Shrink to the width of the columns instead of stretching
            style.align_self = Some(AlignSelf::FlexStart);
        }
        ElementKind::TableHead | ElementKind::TableBody => {}
        ElementKind::TableRow => {
            style.flex_direction = FlexDirection::Row;
        }
        ElementKind::HeaderCell | ElementKind::DataCell => {
            let width = cell_widths
                .get(&idx)
                .copied()
                .unwrap_or_else(|| text_width(&page.texts[idx]) + CELL_PADDING);
            style.size = Size {
                width: Dimension::Length(width),
                height: Dimension::Length(text_lines(&page.texts[idx]).max(1.0)),
            };
        }
    }

    if !kind.is_cell() {
        if let Some(width) = page.widths[idx] {
            style.size.width = Dimension::Length(width);
        }
    }

    if flags.contains(ElementFlags::FIXED) {
        style.position = Position::Absolute;
        if let Some(placement) = page.placements[idx] {
            style.size.width = Dimension::Length(placement.width);
        }
    }

    style
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Is the element part of the layout tree at all.
fn takes_part(page: &Page, idx: usize) -> bool {
    let flags = page.flags[idx];
    !flags.contains(ElementFlags::HIDDEN) || flags.contains(ElementFlags::FIXED)
}

fn build_node(
    page: &Page,
    tree: &mut TaffyTree<()>,
    index_to_node: &mut HashMap<usize, NodeId>,
    cell_widths: &HashMap<usize, f32>,
    idx: usize,
) -> Result<NodeId, TaffyError> {
    let mut children = Vec::with_capacity(page.child_lists[idx].len());
    for &child in &page.child_lists[idx] {
        if takes_part(page, child) {
            children.push(build_node(page, tree, index_to_node, cell_widths, child)?);
        }
    }

    let node = tree.new_with_children(build_style(page, idx, cell_widths), &children)?;
    index_to_node.insert(idx, node);
    Ok(node)
}

fn extract(
    page: &Page,
    tree: &TaffyTree<()>,
    index_to_node: &HashMap<usize, NodeId>,
    idx: usize,
    parent_x: f32,
    parent_y: f32,
    boxes: &mut [Option<LayoutBox>],
) -> Result<(), TaffyError> {
    let Some(&node) = index_to_node.get(&idx) else {
        return Ok(());
    };
    let layout = tree.layout(node)?;
    let layout_box = LayoutBox {
        x: parent_x + layout.location.x,
        y: parent_y + layout.location.y,
        width: layout.size.width,
        height: layout.size.height,
    };
    boxes[idx] = Some(layout_box);

    for &child in &page.child_lists[idx] {
        extract(page, tree, index_to_node, child, layout_box.x, layout_box.y, boxes)?;
    }
    Ok(())
}

/// Lay out every element attached to the page body.
pub fn compute_page_layout(page: &Page) -> Result<PageLayout, TaffyError> {
    let cell_widths = size_tables(page);

    let mut tree: TaffyTree<()> = TaffyTree::new();
    let mut index_to_node: HashMap<usize, NodeId> = HashMap::new();
    let root = build_node(page, &mut tree, &mut index_to_node, &cell_widths, page.root)?;

    let available = Size {
        width: AvailableSpace::Definite(f32::from(page.viewport_width())),
        height: AvailableSpace::MaxContent,
    };
    tree.compute_layout(root, available)?;

    let mut boxes = vec![None; page.capacity()];
    extract(page, &tree, &index_to_node, page.root, 0.0, 0.0, &mut boxes)?;
    Ok(PageLayout { boxes })
}

// =============================================================================
// Tests
// =============================================================================
