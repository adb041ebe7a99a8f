use std::fmt;

use quick_xml::escape::escape;

use crate::{Axis, Coordinate};

/// Receiver for the structural dump produced by `SgTree::print`.
///
/// Events arrive in pre-order; each `begin_branch` is followed by the dump
/// of its left then right subtree and a matching `end_branch`.
pub trait TreeSink {
    fn begin_tree(&mut self) -> fmt::Result;

    fn end_tree(&mut self) -> fmt::Result;

    fn begin_branch(&mut self, axis: Axis, splitter: Coordinate) -> fmt::Result;

    fn end_branch(&mut self) -> fmt::Result;

    fn leaf(&mut self, name: &str, coord: Coordinate) -> fmt::Result;
}

/// Renders the dump as the `<KdTree>` XML fragment of the results document.
///
/// ```text
/// <KdTree>
///   <internal splitDim="0" x="0" y="0">
///     <external name="A" x="0" y="0"/>
///     <external name="B" x="10" y="0"/>
///   </internal>
/// </KdTree>
/// ```
///
/// An empty tree renders as `<KdTree/>`. Coordinates are truncated to
/// integers.
pub struct XmlSink<W: fmt::Write> {
    out: W,
    depth: usize,
    // `<KdTree` written, `>` not yet
    open_tree: bool,
}

impl<W: fmt::Write> XmlSink<W> {
    pub fn new(out: W) -> Self {
        XmlSink {
            out,
            depth: 0,
            open_tree: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn close_tree_tag(&mut self) -> fmt::Result {
        if self.open_tree {
            self.open_tree = false;
            self.out.write_str(">\n")?;
        }
        Ok(())
    }

    fn indent(&mut self) -> fmt::Result {
        for _ in 0..self.depth {
            self.out.write_str("  ")?;
        }
        Ok(())
    }
}

impl<W: fmt::Write> TreeSink for XmlSink<W> {
    fn begin_tree(&mut self) -> fmt::Result {
        self.indent()?;
        self.out.write_str("<KdTree")?;
        self.open_tree = true;
        self.depth += 1;
        Ok(())
    }

    fn end_tree(&mut self) -> fmt::Result {
        self.depth -= 1;
        if self.open_tree {
            self.open_tree = false;
            return self.out.write_str("/>\n");
        }
        self.indent()?;
        self.out.write_str("</KdTree>\n")
    }

    fn begin_branch(&mut self, axis: Axis, splitter: Coordinate) -> fmt::Result {
        self.close_tree_tag()?;
        self.indent()?;
        writeln!(
            self.out,
            r#"<internal splitDim="{}" x="{}" y="{}">"#,
            axis.index(),
            splitter.x as i64,
            splitter.y as i64
        )?;
        self.depth += 1;
        Ok(())
    }

    fn end_branch(&mut self) -> fmt::Result {
        self.depth -= 1;
        self.indent()?;
        self.out.write_str("</internal>\n")
    }

    fn leaf(&mut self, name: &str, coord: Coordinate) -> fmt::Result {
        self.close_tree_tag()?;
        self.indent()?;
        writeln!(
            self.out,
            r#"<external name="{}" x="{}" y="{}"/>"#,
            escape(name),
            coord.x as i64,
            coord.y as i64
        )
    }
}
