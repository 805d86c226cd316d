//! Treeviz formatter for document trees

use super::node::Node;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn display_label(node: &Node) -> String {
    match node {
        Node::Text { text, marks } => {
            if marks.is_empty() {
                format!("{:?}", text)
            } else {
                let names: Vec<&str> = marks.iter().map(|m| m.name.as_str()).collect();
                format!("{:?} [{}]", text, names.join(", "))
            }
        }
        Node::Element { attrs, .. } => {
            if attrs.is_empty() {
                String::new()
            } else {
                let pairs: Vec<String> =
                    attrs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                pairs.join(" ")
            }
        }
    }
}

pub fn to_treeviz_str(root: &Node) -> String {
    let mut result = String::new();
    result.push_str(&format!(
        "{}: {}\n",
        root.name(),
        truncate(&display_label(root), 40)
    ));
    let children = root.children();
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(&mut result, child, "", is_last);
    }
    result
}

fn append_node(result: &mut String, node: &Node, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    result.push_str(&format!(
        "{}{} {}: {}\n",
        prefix,
        connector,
        node.name(),
        truncate(&display_label(node), 40)
    ));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let child_last = i == children.len() - 1;
        append_node(result, child, &new_prefix, child_last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fieldmark::ast::node::Attrs;

    #[test]
    fn test_treeviz_renders_nested_structure() {
        let doc = Node::element(
            "doc",
            Attrs::new(),
            vec![Node::element(
                "paragraph",
                Attrs::new(),
                vec![Node::text("hello", Vec::new())],
            )],
        );
        let rendered = to_treeviz_str(&doc);
        assert!(rendered.starts_with("doc:"));
        assert!(rendered.contains("└─ paragraph:"));
        assert!(rendered.contains("└─ text: \"hello\""));
    }

    #[test]
    fn test_treeviz_truncates_long_text() {
        let long = "x".repeat(100);
        let doc = Node::element(
            "doc",
            Attrs::new(),
            vec![Node::text(long, Vec::new())],
        );
        let rendered = to_treeviz_str(&doc);
        assert!(rendered.contains("..."));
    }
}
