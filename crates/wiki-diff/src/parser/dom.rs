//! Small helpers over `markup5ever_rcdom` nodes.

use markup5ever_rcdom::{Handle, NodeData};

/// Local tag name of an element node, lowercase as produced by the parser.
pub(crate) fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

/// Value of an attribute, if the node is an element carrying it.
pub(crate) fn attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == attr_name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Whitespace separated `class` attribute entries.
pub(crate) fn class_list(node: &Handle) -> Vec<String> {
    attr(node, "class")
        .map(|value| value.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Number of table columns a cell occupies.
pub(crate) fn colspan(node: &Handle) -> usize {
    attr(node, "colspan")
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Concatenated text of all descendant text nodes.
pub(crate) fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    push_text(node, &mut out);
    out
}

fn push_text(node: &Handle, out: &mut String) {
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { .. } => push_text(child, out),
            _ => {}
        }
    }
}

/// Element children of a node whose tag is one of `names`.
pub(crate) fn child_elements(node: &Handle, names: &[&str]) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|child| tag_name(child).is_some_and(|tag| names.contains(&tag)))
        .cloned()
        .collect()
}

/// Whitespace only text (NBSP included).
pub(crate) fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Indentation between tags, as opposed to text that is part of a line.
pub(crate) fn is_formatting_whitespace(text: &str) -> bool {
    text.contains('\n') && is_blank(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(is_blank("\u{a0}"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_formatting_whitespace() {
        assert!(is_formatting_whitespace("\n    "));
        assert!(!is_formatting_whitespace("   "));
        assert!(!is_formatting_whitespace("\n x"));
    }
}
