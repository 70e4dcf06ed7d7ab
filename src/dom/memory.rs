//! In-memory document tree implementing [`Dom`], used to drive the page
//! controller natively in tests.

use std::collections::BTreeMap;

use super::{Dom, Role, Selector};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Clone, Debug, Default)]
struct MemoryNode {
    tag: String,
    parent: Option<usize>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    markup: String,
    offset_top: f64,
}

/// Flat arena of elements. Node 0 is `<html>`, 1 is `<head>`, 2 is `<body>`.
#[derive(Clone, Debug)]
pub struct MemoryDom {
    nodes: Vec<MemoryNode>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub const ROOT: NodeId = NodeId(0);
    pub const HEAD: NodeId = NodeId(1);
    pub const BODY: NodeId = NodeId(2);

    pub fn new() -> Self {
        let mut dom = Self {
            nodes: vec![MemoryNode {
                tag: "html".to_string(),
                ..Default::default()
            }],
        };
        dom.push(Self::ROOT, "head");
        dom.push(Self::ROOT, "body");
        dom
    }

    /// Appends an element described as `tag#id.class.class` (id and classes
    /// optional) under `parent`.
    pub fn append(&mut self, parent: NodeId, desc: &str) -> NodeId {
        let (head, classes) = match desc.split_once('.') {
            Some((head, rest)) => (head, rest.split('.').collect::<Vec<_>>()),
            None => (desc, Vec::new()),
        };
        let (tag, id) = match head.split_once('#') {
            Some((tag, id)) => (tag, Some(id)),
            None => (head, None),
        };
        let node = self.push(parent, if tag.is_empty() { "div" } else { tag });
        if let Some(id) = id {
            self.nodes[node.0].attrs.insert("id".to_string(), id.to_string());
        }
        self.nodes[node.0].classes = classes.into_iter().map(str::to_string).collect();
        node
    }

    pub fn set_offset_top(&mut self, node: NodeId, top: f64) {
        self.nodes[node.0].offset_top = top;
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&i| self.nodes[i].parent == Some(parent.0))
            .map(NodeId)
            .collect()
    }

    fn push(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.nodes.push(MemoryNode {
            tag: tag.to_ascii_lowercase(),
            parent: Some(parent.0),
            ..Default::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    fn matches(&self, idx: usize, selector: &Selector) -> bool {
        let node = &self.nodes[idx];
        match selector {
            Selector::Root => idx == 0,
            Selector::Tag(tag) => node.tag.eq_ignore_ascii_case(tag),
            Selector::Id(id) => node.attrs.get("id").is_some_and(|v| v == *id),
            Selector::Class(class) => node.classes.iter().any(|c| c == *class),
            Selector::HasAttrs(attrs) => attrs.iter().all(|a| node.attrs.contains_key(*a)),
            Selector::HashLink => {
                node.tag == "a" && node.attrs.get("href").is_some_and(|h| h.starts_with('#'))
            }
        }
    }

    fn matches_role(&self, idx: usize, role: Role) -> bool {
        role.selectors().iter().any(|s| self.matches(idx, s))
    }

    fn is_descendant(&self, idx: usize, ancestor: usize) -> bool {
        let mut cur = self.nodes[idx].parent;
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.nodes[p].parent;
        }
        false
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn query_all(&self, role: Role) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&i| self.matches_role(i, role))
            .map(NodeId)
            .collect()
    }

    fn query_within(&self, scope: &NodeId, role: Role) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&i| self.is_descendant(i, scope.0) && self.matches_role(i, role))
            .map(NodeId)
            .collect()
    }

    fn by_id(&self, id: &str) -> Option<NodeId> {
        (0..self.nodes.len())
            .find(|&i| self.nodes[i].attrs.get("id").is_some_and(|v| v == id))
            .map(NodeId)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        if name == "class" {
            return Some(self.nodes[node.0].classes.join(" "));
        }
        self.nodes[node.0].attrs.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        if name == "class" {
            self.nodes[node.0].classes = value.split_whitespace().map(str::to_string).collect();
            return;
        }
        self.nodes[node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn text(&self, node: &NodeId) -> String {
        self.nodes[node.0].text.clone()
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        let n = &mut self.nodes[node.0];
        n.text = text.to_string();
        n.markup = text.to_string();
    }

    fn markup(&self, node: &NodeId) -> String {
        self.nodes[node.0].markup.clone()
    }

    fn set_markup(&mut self, node: &NodeId, markup: &str) {
        let n = &mut self.nodes[node.0];
        n.markup = markup.to_string();
        n.text = markup.to_string();
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.nodes[node.0].classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    fn style(&self, node: &NodeId, property: &str) -> String {
        self.nodes[node.0]
            .style
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        self.nodes[node.0]
            .style
            .insert(property.to_string(), value.to_string());
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.nodes[node.0].offset_top
    }

    fn append_element(&mut self, parent: &NodeId, tag: &str) -> Option<NodeId> {
        Some(self.push(*parent, tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_parses_id_and_classes() {
        let mut dom = MemoryDom::new();
        let btn = dom.append(MemoryDom::BODY, "button#langToggle.btn.icon");
        assert_eq!(dom.tag(btn), "button");
        assert_eq!(dom.query(Role::LanguageToggle), Some(btn));
        assert!(dom.has_class(&btn, "btn") && dom.has_class(&btn, "icon"));
    }

    #[test]
    fn test_query_within_only_descendants() {
        let mut dom = MemoryDom::new();
        let toggle = dom.append(MemoryDom::BODY, "button#mobileToggle");
        let inner = dom.append(toggle, "span");
        dom.append(MemoryDom::BODY, "span");
        assert_eq!(dom.query_within(&toggle, Role::MenuBar), vec![inner]);
        assert_eq!(dom.query_all(Role::MenuBar).len(), 2);
    }

    #[test]
    fn test_role_groups_match_any_selector() {
        let mut dom = MemoryDom::new();
        let a = dom.append(MemoryDom::BODY, "a");
        dom.set_attribute(&a, "href", "#about");
        let card = dom.append(MemoryDom::BODY, "div.project-card");
        dom.append(MemoryDom::BODY, "div.plain");
        assert_eq!(dom.query_all(Role::Interactive), vec![a, card]);
        assert_eq!(dom.query_all(Role::AnchorLink), vec![a]);
        assert_eq!(dom.query(Role::Root), Some(MemoryDom::ROOT));
        assert_eq!(dom.query(Role::Body), Some(MemoryDom::BODY));
    }

    #[test]
    fn test_toggle_class_reports_state() {
        let mut dom = MemoryDom::new();
        let n = dom.append(MemoryDom::BODY, "ul.nav-menu");
        assert!(dom.toggle_class(&n, "active"));
        assert!(!dom.toggle_class(&n, "active"));
        assert!(!dom.has_class(&n, "active"));
    }
}
