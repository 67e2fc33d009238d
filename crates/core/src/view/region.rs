use std::fmt::Write as _;

/// One rendered recommendation card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub classes: Vec<&'static str>,
    pub heading: String,
    pub lines: Vec<String>,
}

impl Block {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    Text(String),
    Block(Block),
}

/// The container whose content is replaced wholesale on every render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayRegion {
    children: Vec<ViewNode>,
}

impl DisplayRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Replaces everything in the region with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(ViewNode::Text(text.into()));
    }

    pub fn append(&mut self, block: Block) {
        self.children.push(ViewNode::Block(block));
    }

    pub fn children(&self) -> &[ViewNode] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.children.iter().filter_map(|node| match node {
            ViewNode::Block(b) => Some(b),
            ViewNode::Text(_) => None,
        })
    }

    /// Inner markup of the region, one element per child.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                ViewNode::Text(text) => out.push_str(&escape_html(text)),
                ViewNode::Block(block) => {
                    let _ = write!(
                        out,
                        "<div class=\"{}\"><h3>{}</h3>",
                        block.classes.join(" "),
                        escape_html(&block.heading)
                    );
                    for line in &block.lines {
                        let _ = write!(out, "<p>{}</p>", escape_html(line));
                    }
                    out.push_str("</div>");
                }
            }
        }
        out
    }

    /// Plain-text rendering for terminals: blocks separated by blank lines.
    pub fn to_text(&self) -> String {
        let mut parts = Vec::with_capacity(self.children.len());
        for node in &self.children {
            match node {
                ViewNode::Text(text) => parts.push(text.clone()),
                ViewNode::Block(block) => {
                    let mut s = format!("{} [{}]", block.heading, block.classes.join(" "));
                    for line in &block.lines {
                        s.push_str("\n  ");
                        s.push_str(line);
                    }
                    parts.push(s);
                }
            }
        }
        parts.join("\n\n")
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
