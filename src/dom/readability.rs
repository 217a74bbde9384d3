//! Readability-style article extraction.
//!
//! Scores DOM subtrees by text density, link density, tag semantics,
//! and class/id keyword hints.  The highest-scoring block is taken as the
//! article body and flattened to plain text, one block element per line.

use crate::dom::{DomNode, DomTree, NodeType};

/// Subtrees that never belong to article text
const SKIP_SUBTREE: &[&str] = &["nav", "aside", "footer", "form", "header", "button", "select"];

/// Elements that start a new line in extracted text
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "li", "ul", "ol", "blockquote", "pre", "h1",
    "h2", "h3", "h4", "h5", "h6", "table", "tr", "figure", "figcaption", "dd", "dt", "br",
];

/// Leaf-ish blocks; when one of these wins, its parent holds the article.
const PARAGRAPH_TAGS: &[&str] = &["p", "blockquote", "pre"];

const MIN_SCORE: f32 = 5.0;

/// Score a single element node for content-richness.
fn score_node(node: &DomNode) -> f32 {
    let text = node.collect_text();
    let text_len = text.len() as f32;

    if text_len < 25.0 {
        return -1.0;
    }

    let mut score: f32 = 0.0;

    // Text length (log-scale, capped)
    score += text_len.ln().min(8.0);

    score += node.text_density().min(50.0) * 0.3;
    score -= node.link_density() * 25.0;

    match node.tag.as_str() {
        "article" | "main" => score += 10.0,
        "section" => score += 5.0,
        "p" => score += 3.0,
        "blockquote" | "pre" => score += 3.0,
        "div" => score += 1.0,
        "nav" | "aside" => score -= 10.0,
        "footer" | "header" => score -= 5.0,
        "form" => score -= 5.0,
        "body" | "html" => score -= 2.0,
        _ => {}
    }

    let id_class = format!(
        "{} {} {}",
        node.attr("id").unwrap_or(""),
        node.attr("class").unwrap_or(""),
        node.attr("role").unwrap_or("")
    )
    .to_lowercase();

    for kw in &["content", "article", "post", "entry", "story", "main-text", "body-text"] {
        if id_class.contains(kw) {
            score += 8.0;
        }
    }
    for kw in &[
        "sidebar", "nav", "menu", "comment", "footer", "header", "promo", "social", "share",
        "widget", "related",
    ] {
        if id_class.contains(kw) {
            score -= 8.0;
        }
    }

    let p_count = node.children.iter().filter(|c| c.tag == "p").count();
    score += p_count as f32 * 2.0;

    score
}

/// Walk the tree and find the path (child indices) to the best content node.
fn find_best_path(
    node: &DomNode,
    current: &mut Vec<usize>,
    best_path: &mut Option<Vec<usize>>,
    best_score: &mut f32,
) {
    if node.node_type == NodeType::Element {
        if SKIP_SUBTREE.contains(&node.tag.as_str()) {
            return;
        }
        let s = score_node(node);
        if s > *best_score {
            *best_score = s;
            *best_path = Some(current.clone());
        }
    }
    for (i, child) in node.children.iter().enumerate() {
        current.push(i);
        find_best_path(child, current, best_path, best_score);
        current.pop();
    }
}

fn walk_path<'a>(root: &'a DomNode, path: &[usize]) -> Option<&'a DomNode> {
    let mut current = root;
    for &idx in path {
        current = current.children.get(idx)?;
    }
    Some(current)
}

/// Locate the subtree most likely to hold the article body.
pub fn find_content_node(root: &DomNode) -> Option<&DomNode> {
    let mut best_score = MIN_SCORE;
    let mut best_path = None;
    find_best_path(root, &mut Vec::new(), &mut best_path, &mut best_score);

    let mut path = best_path?;
    if let Some(node) = walk_path(root, &path) {
        if PARAGRAPH_TAGS.contains(&node.tag.as_str()) && !path.is_empty() {
            path.pop();
        }
    }
    walk_path(root, &path)
}

/// Extract the main article text, paragraphs separated by `\n`.
///
/// Falls back to `<body>` when no block scores above the threshold.
pub fn extract_article_text(tree: &DomTree) -> Option<String> {
    let node = find_content_node(&tree.root)
        .or_else(|| tree.root.find("body"))
        .unwrap_or(&tree.root);

    let mut raw = String::new();
    collect_block_text(node, &mut raw);

    let text = raw
        .replace('\u{00a0}', " ")
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let text = text.trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn collect_block_text(node: &DomNode, out: &mut String) {
    match node.node_type {
        NodeType::Text => {
            if !out.is_empty() && !out.ends_with(char::is_whitespace) {
                out.push(' ');
            }
            out.push_str(node.text.trim());
        }
        NodeType::Element => {
            if SKIP_SUBTREE.contains(&node.tag.as_str()) {
                return;
            }
            let block = BLOCK_TAGS.contains(&node.tag.as_str());
            if block {
                out.push('\n');
            }
            for child in &node.children {
                collect_block_text(child, out);
            }
            if block {
                out.push('\n');
            }
        }
    }
}
