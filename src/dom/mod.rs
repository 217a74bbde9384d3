pub mod parser;
pub mod readability;

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Element,
    Text,
}

/// Minimal DOM node: enough structure to score subtrees and pull text out.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub children: Vec<DomNode>,
    pub node_type: NodeType,
}

impl DomNode {
    pub fn element(
        tag: impl Into<String>,
        attrs: HashMap<String, String>,
        children: Vec<DomNode>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attributes: attrs,
            text: String::new(),
            children,
            node_type: NodeType::Element,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            attributes: HashMap::new(),
            text: content.into(),
            children: Vec::new(),
            node_type: NodeType::Text,
        }
    }

    /// Recursively count all nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Collect all text content recursively, space separated
    pub fn collect_text(&self) -> String {
        let mut buf = String::new();
        self.collect_text_inner(&mut buf);
        buf
    }

    fn collect_text_inner(&self, buf: &mut String) {
        let t = self.text.trim();
        if !t.is_empty() {
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(t);
        }
        for child in &self.children {
            child.collect_text_inner(buf);
        }
    }

    /// Text-to-markup density (higher = more content-rich)
    pub fn text_density(&self) -> f32 {
        let text_len = self.collect_text().len() as f32;
        let total_nodes = self.node_count() as f32;
        if total_nodes == 0.0 {
            0.0
        } else {
            text_len / total_nodes
        }
    }

    /// Ratio of text inside `<a>` descendants to all text
    pub fn link_density(&self) -> f32 {
        let total_text = self.collect_text().len() as f32;
        if total_text == 0.0 {
            return 0.0;
        }
        link_text_len(self) as f32 / total_text
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Depth-first search for the first element with `tag`.
    pub fn find(&self, tag: &str) -> Option<&DomNode> {
        if self.node_type == NodeType::Element && self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(tag))
    }
}

fn link_text_len(node: &DomNode) -> usize {
    node.children
        .iter()
        .map(|c| {
            if c.tag == "a" {
                c.collect_text().len()
            } else {
                link_text_len(c)
            }
        })
        .sum()
}

/// Parsed DOM tree with metadata
#[derive(Debug, Clone)]
pub struct DomTree {
    pub root: DomNode,
    pub url: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(tag: &str, children: Vec<DomNode>) -> DomNode {
        DomNode::element(tag, HashMap::new(), children)
    }

    #[test]
    fn link_density_counts_nested_anchors() {
        let node = el(
            "div",
            vec![
                DomNode::text("plain text here"),
                el("ul", vec![el("li", vec![el("a", vec![DomNode::text("link text")])])]),
            ],
        );
        let density = node.link_density();
        assert!(density > 0.3 && density < 0.5, "density {}", density);
    }

    #[test]
    fn find_returns_first_match() {
        let tree = el(
            "html",
            vec![el("head", vec![]), el("body", vec![DomNode::text("x")])],
        );
        assert_eq!(tree.find("body").map(|n| n.children.len()), Some(1));
        assert!(tree.find("main").is_none());
    }
}
