// SPDX-License-Identifier: GPL-3.0-only

//! Plain-text rendering of a panel block: a title/actions header followed by
//! a labeled two-column list.

use health_panel::PanelBlock;

/// Render the block with labels left-aligned to the widest label and a
/// two-space gutter before the values.
pub fn render_block(block: &PanelBlock) -> String {
    let mut out = String::new();

    out.push_str(block.title);
    out.push('\n');

    if !block.menu.is_empty() {
        out.push_str("Actions:");
        for item in &block.menu {
            out.push_str("  ");
            out.push_str(item.label);
            if !item.enabled {
                out.push_str(" (disabled)");
            }
            out.push(',');
        }
        // Drop the trailing comma.
        out.pop();
        out.push('\n');
    }
    out.push('\n');

    let width = block
        .rows
        .iter()
        .map(|r| r.label.len())
        .max()
        .unwrap_or(0);

    for row in &block.rows {
        out.push_str(&format!("{:<width$}  {}\n", row.label, row.text));
    }

    for notice in &block.notices {
        out.push('\n');
        out.push_str(notice);
        out.push('\n');
    }

    out
}
