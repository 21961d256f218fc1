//! Pipe table formatting.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::convert::{Frame, Walker};
use crate::node::{DocumentNode, NodeView, Tag};
use crate::normalize::normalize;
use crate::{ConvertError, Result};

static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("valid newline pattern"));

/// Converted table content, before rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableModel {
    pub header_cells: Vec<String>,
    pub body_rows: Vec<Vec<String>>,
}

impl TableModel {
    /// Build the model from converted rows.
    ///
    /// The header is the first row holding a `th` cell, or the first row when
    /// no row has one. `None` when there are no rows.
    pub fn from_rows(rows: Vec<Row>) -> Option<Self> {
        let header_index = rows.iter().position(|row| row.has_header_cell).unwrap_or(0);
        if rows.is_empty() {
            return None;
        }

        let mut header_cells = Vec::new();
        let mut body_rows = Vec::with_capacity(rows.len() - 1);
        for (i, row) in rows.into_iter().enumerate() {
            if i == header_index {
                header_cells = row.cells;
            } else {
                body_rows.push(row.cells);
            }
        }

        Some(Self {
            header_cells,
            body_rows,
        })
    }

    /// Columns in the rendered table.
    ///
    /// Body rows wider than the header extend it with unlabeled columns.
    pub fn column_count(&self) -> usize {
        self.body_rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header_cells.len()))
            .max()
            .unwrap_or(0)
    }

    /// Render as a pipe table with every line padded to the column count
    pub fn render(&self) -> String {
        let columns = self.column_count();

        let mut lines = Vec::with_capacity(self.body_rows.len() + 2);
        lines.push(render_row(&self.header_cells, columns));
        lines.push(render_row(&vec!["---".to_string(); columns], columns));
        for row in &self.body_rows {
            lines.push(render_row(row, columns));
        }

        lines.join("\n")
    }
}

/// One converted `tr`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<String>,
    pub has_header_cell: bool,
}

fn render_row(cells: &[String], columns: usize) -> String {
    let mut line = String::from("|");
    for i in 0..columns {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        line.push(' ');
        line.push_str(cell);
        line.push_str(" |");
    }
    line
}

pub(crate) fn table(walker: &Walker, node: &DocumentNode, frame: &mut Frame) -> Result<String> {
    let row_nodes = collect_rows(node, frame.depth, walker.max_depth())?;

    let mut rows = Vec::with_capacity(row_nodes.len());
    for (tr, depth) in row_nodes {
        rows.push(row(walker, tr, &mut frame.at_depth(depth))?);
    }

    // rows without a single cell leave nothing to lay out
    match TableModel::from_rows(rows).filter(|model| model.column_count() > 0) {
        Some(model) => {
            tracing::trace!(
                columns = model.column_count(),
                body_rows = model.body_rows.len(),
                "table"
            );
            Ok(format!("\n\n{}\n\n", model.render()))
        }
        None => Ok(String::new()),
    }
}

/// Every `tr` below `table` in document order with its depth, not entering
/// nested tables
fn collect_rows(
    table: &DocumentNode,
    depth: usize,
    max_depth: usize,
) -> Result<Vec<(&DocumentNode, usize)>> {
    let mut rows = Vec::new();
    let mut pending: Vec<_> = table.children().iter().rev().map(|child| (child, depth + 1)).collect();

    while let Some((child, depth)) = pending.pop() {
        if depth > max_depth {
            return Err(ConvertError::TooDeep(max_depth));
        }
        if let NodeView::Element { tag, node } = child.view()? {
            match tag {
                Tag::TableRow => rows.push((node, depth)),
                Tag::Table => {}
                _ => pending.extend(node.children().iter().rev().map(|child| (child, depth + 1))),
            }
        }
    }
    Ok(rows)
}

fn row(walker: &Walker, tr: &DocumentNode, frame: &mut Frame) -> Result<Row> {
    let mut row = Row::default();
    for child in tr.children() {
        if let NodeView::Element { tag, node } = child.view()? {
            if tag.is_cell() {
                row.has_header_cell |= tag == Tag::HeaderCell;
                row.cells.push(cell(walker, node, &mut frame.descend())?);
            }
        }
    }
    Ok(row)
}

fn cell(walker: &Walker, node: &DocumentNode, frame: &mut Frame) -> Result<String> {
    let content = normalize(&walker.children(node, frame)?);
    let escaped = content.replace('|', "\\|");
    Ok(NEWLINE_RUN.replace_all(&escaped, "<br>").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert;
    use pretty_assertions::assert_eq;

    fn tr(cell_tag: &str, cells: &[&str]) -> DocumentNode {
        let mut row = DocumentNode::element("tr");
        for text in cells {
            row.add_child(DocumentNode::element(cell_tag).with_text(text));
        }
        row
    }

    fn md(table: DocumentNode) -> String {
        convert(&DocumentNode::element("div").with_child(table)).unwrap()
    }

    #[test]
    fn test_header_and_short_body_row() {
        let table = DocumentNode::element("table")
            .with_child(tr("th", &["A", "B"]))
            .with_child(tr("td", &["1"]));
        assert_eq!(md(table), "| A | B |\n| --- | --- |\n| 1 |  |");
    }

    #[test]
    fn test_sections_are_searched() {
        let table = DocumentNode::element("table")
            .with_child(DocumentNode::element("thead").with_child(tr("th", &["Name", "Qty"])))
            .with_child(
                DocumentNode::element("tbody")
                    .with_child(tr("td", &["apple", "3"]))
                    .with_child(tr("td", &["pear", "5"])),
            );
        assert_eq!(
            md(table),
            "| Name | Qty |\n| --- | --- |\n| apple | 3 |\n| pear | 5 |"
        );
    }

    #[test]
    fn test_first_row_is_header_without_th() {
        let table = DocumentNode::element("table")
            .with_child(tr("td", &["x", "y"]))
            .with_child(tr("td", &["1", "2"]));
        assert_eq!(md(table), "| x | y |\n| --- | --- |\n| 1 | 2 |");
    }

    #[test]
    fn test_first_th_row_wins_over_earlier_rows() {
        let table = DocumentNode::element("table")
            .with_child(tr("td", &["early"]))
            .with_child(tr("th", &["Head"]))
            .with_child(tr("td", &["late"]));
        assert_eq!(md(table), "| Head |\n| --- |\n| early |\n| late |");
    }

    #[test]
    fn test_wide_body_row_extends_header() {
        let table = DocumentNode::element("table")
            .with_child(tr("th", &["A"]))
            .with_child(tr("td", &["1", "2", "3"]));
        assert_eq!(md(table), "| A |  |  |\n| --- | --- | --- |\n| 1 | 2 | 3 |");
    }

    #[test]
    fn test_cell_escaping() {
        let cell = DocumentNode::element("td")
            .with_text("a|b")
            .with_child(DocumentNode::element("br"))
            .with_child(DocumentNode::element("br"))
            .with_child(DocumentNode::element("b").with_text("c"));
        let table = DocumentNode::element("table")
            .with_child(tr("th", &["H"]))
            .with_child(DocumentNode::element("tr").with_child(cell));
        assert_eq!(md(table), "| H |\n| --- |\n| a\\|b<br>**c** |");
    }

    #[test]
    fn test_cell_paragraphs_joined() {
        let cell = DocumentNode::element("td")
            .with_child(DocumentNode::element("p").with_text("one"))
            .with_child(DocumentNode::element("p").with_text("two"));
        let table = DocumentNode::element("table").with_child(DocumentNode::element("tr").with_child(cell));
        assert_eq!(md(table), "| one<br>two |\n| --- |");
    }

    #[test]
    fn test_empty_table_yields_nothing() {
        let table = DocumentNode::element("table").with_child(DocumentNode::element("tbody"));
        assert_eq!(md(table), "");
    }

    #[test]
    fn test_rows_without_cells_yield_nothing() {
        let table = DocumentNode::element("table")
            .with_child(DocumentNode::element("tr"))
            .with_child(DocumentNode::element("tr").with_text("stray"));
        let doc = DocumentNode::element("div")
            .with_child(DocumentNode::element("p").with_text("a"))
            .with_child(table)
            .with_child(DocumentNode::element("p").with_text("b"));
        assert_eq!(convert(&doc).unwrap(), "a\n\nb");
    }

    #[test]
    fn test_nested_table_rows_not_hoisted() {
        let inner = DocumentNode::element("table").with_child(tr("td", &["inner"]));
        let outer_cell = DocumentNode::element("td").with_text("outer").with_child(inner);
        let table = DocumentNode::element("table").with_child(DocumentNode::element("tr").with_child(outer_cell));
        let out = md(table);
        assert!(out.starts_with("| outer"));
        assert_eq!(out.lines().filter(|l| l.starts_with("| ---")).count(), 1);
    }

    #[test]
    fn test_table_between_paragraphs() {
        let doc = DocumentNode::element("div")
            .with_child(DocumentNode::element("p").with_text("before"))
            .with_child(DocumentNode::element("table").with_child(tr("th", &["A"])))
            .with_child(DocumentNode::element("p").with_text("after"));
        assert_eq!(convert(&doc).unwrap(), "before\n\n| A |\n| --- |\n\nafter");
    }

    #[test]
    fn test_model_column_count() {
        let model = TableModel {
            header_cells: vec!["a".into(), "b".into()],
            body_rows: vec![vec!["1".into()], vec![]],
        };
        assert_eq!(model.column_count(), 2);
        assert_eq!(model.render(), "| a | b |\n| --- | --- |\n| 1 |  |\n|  |  |");
    }
}
