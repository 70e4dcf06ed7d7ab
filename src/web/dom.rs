//! [`Dom`] over the live browser document.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList};

use crate::dom::{Dom, Role};

pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn elements(list: Result<NodeList, wasm_bindgen::JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn html(el: &Element) -> Option<&HtmlElement> {
    el.dyn_ref::<HtmlElement>()
}

impl Dom for WebDom {
    type Node = Element;

    fn query_all(&self, role: Role) -> Vec<Element> {
        elements(self.document.query_selector_all(&role.css()))
    }

    fn query_within(&self, scope: &Element, role: Role) -> Vec<Element> {
        elements(scope.query_selector_all(&role.css()))
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            log::debug!("set_attribute {name} failed: {err:?}");
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn markup(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_markup(&mut self, node: &Element, markup: &str) {
        node.set_inner_html(markup);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            log::debug!("add class {class} failed: {err:?}");
        }
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            log::debug!("remove class {class} failed: {err:?}");
        }
    }

    fn toggle_class(&mut self, node: &Element, class: &str) -> bool {
        node.class_list().toggle(class).unwrap_or(false)
    }

    fn style(&self, node: &Element, property: &str) -> String {
        html(node)
            .and_then(|h| h.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) {
        if let Some(h) = html(node) {
            if let Err(err) = h.style().set_property(property, value) {
                log::debug!("set style {property} failed: {err:?}");
            }
        }
    }

    fn offset_top(&self, node: &Element) -> f64 {
        html(node).map_or(0.0, |h| f64::from(h.offset_top()))
    }

    fn append_element(&mut self, parent: &Element, tag: &str) -> Option<Element> {
        let el = self.document.create_element(tag).ok()?;
        parent.append_child(&el).ok()?;
        Some(el)
    }
}
