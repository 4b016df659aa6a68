// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scaling committed rows and columns to a fixed grid.

use kurbo::{Point, Rect, Size};

use crate::layout::LayoutSummary;
use crate::types::NodeLayout;

/// Fixed cell size used to place nodes.
///
/// Row height is a constant supplied by the host; the layout never measures labels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridMetrics {
    /// Width of one depth column.
    pub column_width: f64,
    /// Height of one row, including any margin between rows.
    pub row_height: f64,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            column_width: 200.0,
            row_height: 30.0,
        }
    }
}

impl GridMetrics {
    /// Top-left corner of the node's cell.
    pub fn origin(&self, layout: &NodeLayout) -> Point {
        Point::new(
            layout.column() as f64 * self.column_width,
            layout.row as f64 * self.row_height,
        )
    }

    /// The node's cell.
    pub fn cell(&self, layout: &NodeLayout) -> Rect {
        Rect::from_origin_size(self.origin(layout), Size::new(self.column_width, self.row_height))
    }

    /// Size of the area covering every visible cell.
    pub fn content_size(&self, summary: &LayoutSummary) -> Size {
        Size::new(
            summary.columns as f64 * self.column_width,
            summary.rows as f64 * self.row_height,
        )
    }
}
