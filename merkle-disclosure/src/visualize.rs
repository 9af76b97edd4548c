//! Human-readable dumps of node lists.
//!
//! ```text
//! merkle nodes (11)
//!    [0:0] e7b810be..f779e519
//!        [1:0] 58c89d70..1c102cfd
//!        [1:1] 89c6e71e..4a806c13
//!            [2:0] 62af5c3c..a90154da
//! ```

use core::fmt;
use std::io::{Result, Write};

use itertools::Itertools;

use crate::MerkleNode;

static HASH_LEN: usize = 8;
static INDENT_SPACES: usize = 4;

/// Pretty visualization of Merkle data.
pub trait Visualize {
    /// Write `self` through `drawer`.
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>>;
}

/// A `io::Write` proxy that indents every new line by the current depth.
pub struct Drawer<W: Write> {
    level: usize,
    write: W,
}

impl<W: Write> Drawer<W> {
    /// Wrap a writer at depth 0.
    pub fn new(write: W) -> Self {
        Drawer { level: 0, write }
    }

    /// Indent following lines one step further.
    pub fn down(&mut self) {
        self.level += 1;
    }

    /// Undo one [`down`](Self::down).
    pub fn up(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Write `buf`, indenting after every newline.
    pub fn write(&mut self, buf: &[u8]) -> Result<()> {
        let lines_iter = buf.split(|c| *c == b'\n');
        let sep = if self.level > 0 {
            let mut result = " ".repeat(INDENT_SPACES * self.level - 1);
            result.insert(0, '\n');
            result
        } else {
            String::from("\n")
        };
        let interspersed_lines_iter = Itertools::intersperse(lines_iter, sep.as_bytes());
        for line in interspersed_lines_iter {
            self.write.write_all(line)?;
        }
        Ok(())
    }

    /// Terminate the output with a newline and flush.
    pub fn flush(&mut self) -> Result<()> {
        self.write.write_all(b"\n")?;
        self.write.flush()?;
        Ok(())
    }
}

/// Shorten a hash to its first and last few characters.
pub fn short_hash(hash: &str) -> String {
    let len = hash.chars().count();
    if len <= 2 * HASH_LEN + 2 {
        return hash.to_string();
    }
    let head: String = hash.chars().take(HASH_LEN).collect();
    let tail: String = hash.chars().skip(len - HASH_LEN).collect();
    format!("{}..{}", head, tail)
}

impl Visualize for MerkleNode {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        let line = format!("[{}:{}] {}", self.level, self.index, short_hash(&self.hash));
        drawer.write(line.as_bytes())?;
        Ok(drawer)
    }
}

impl Visualize for [MerkleNode] {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(format!("merkle nodes ({})", self.len()).as_bytes())?;
        for node in self {
            for _ in 0..=node.level {
                drawer.down();
            }
            drawer.write(b"\n")?;
            drawer = node.visualize(drawer)?;
            for _ in 0..=node.level {
                drawer.up();
            }
        }
        Ok(drawer)
    }
}

/// Write a node list to `write`, one indented line per node.
pub fn visualize_tree<W: Write>(nodes: &[MerkleNode], write: W) -> Result<()> {
    let mut drawer = nodes.visualize(Drawer::new(write))?;
    drawer.flush()
}

/// `Display` adapter over a node list.
pub struct TreeDisplay<'a>(pub &'a [MerkleNode]);

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut v = Vec::new();
        self.0
            .visualize(Drawer::new(&mut v))
            .map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&v))
    }
}
