//! Document abstraction used by every page behaviour.
//!
//! Behaviours never touch web-sys directly: they look elements up by [`Role`]
//! and mutate them through the [`Dom`] trait. `web::WebDom` backs it with the
//! live document, [`memory::MemoryDom`] with an in-memory tree for tests.

use std::fmt;

pub mod memory;

/// Simple selector understood by both the browser and the in-memory tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector {
    Root,
    Tag(&'static str),
    Id(&'static str),
    Class(&'static str),
    /// Element carrying every listed attribute.
    HasAttrs(&'static [&'static str]),
    /// Anchor whose `href` starts with `#`.
    HashLink,
}

impl Selector {
    pub fn css(&self) -> String {
        match self {
            Selector::Root => ":root".to_string(),
            Selector::Tag(tag) => (*tag).to_string(),
            Selector::Id(id) => format!("#{id}"),
            Selector::Class(class) => format!(".{class}"),
            Selector::HasAttrs(attrs) => attrs.iter().map(|a| format!("[{a}]")).collect(),
            Selector::HashLink => "a[href^=\"#\"]".to_string(),
        }
    }
}

/// Elements the page controller knows how to find.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Root,
    Head,
    Body,
    ThemeToggle,
    LanguageToggle,
    /// Short language code label nested inside the language toggle.
    LanguageLabel,
    MenuToggle,
    /// Hamburger bars nested inside the menu toggle.
    MenuBar,
    NavMenu,
    NavLink,
    Navbar,
    AnchorLink,
    Translatable,
    RevealTarget,
    HeroImage,
    HeroTitle,
    ProgressFill,
    ProjectCard,
    Interactive,
    AnimatedBackground,
}

impl Role {
    pub fn selectors(self) -> &'static [Selector] {
        use Selector::*;
        match self {
            Role::Root => &[Root],
            Role::Head => &[Tag("head")],
            Role::Body => &[Tag("body")],
            Role::ThemeToggle => &[Id("themeToggle")],
            Role::LanguageToggle => &[Id("langToggle")],
            Role::LanguageLabel => &[Class("lang-text")],
            Role::MenuToggle => &[Id("mobileToggle")],
            Role::MenuBar => &[Tag("span")],
            Role::NavMenu => &[Class("nav-menu")],
            Role::NavLink => &[Class("nav-link")],
            Role::Navbar => &[Id("navbar")],
            Role::AnchorLink => &[HashLink],
            Role::Translatable => &[HasAttrs(&["data-en", "data-th"])],
            Role::RevealTarget => &[
                Class("glass-card"),
                Class("skill-card"),
                Class("project-card"),
                Class("about-card"),
            ],
            Role::HeroImage => &[Class("hero-image")],
            Role::HeroTitle => &[Class("hero-title")],
            Role::ProgressFill => &[Class("progress-fill")],
            Role::ProjectCard => &[Class("project-card")],
            Role::Interactive => &[
                Tag("a"),
                Tag("button"),
                Class("project-card"),
                Class("skill-card"),
            ],
            Role::AnimatedBackground => &[Class("animated-bg")],
        }
    }

    /// Selector group in CSS syntax, for `querySelectorAll`.
    pub fn css(self) -> String {
        self.selectors()
            .iter()
            .map(Selector::css)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.css())
    }
}

/// Find-by-role and apply-visual-state operations over a document tree.
pub trait Dom {
    type Node: Clone + PartialEq;

    /// All elements matching `role`, in document order.
    fn query_all(&self, role: Role) -> Vec<Self::Node>;

    fn query(&self, role: Role) -> Option<Self::Node> {
        self.query_all(role).into_iter().next()
    }

    /// Descendants of `scope` matching `role`.
    fn query_within(&self, scope: &Self::Node, role: Role) -> Vec<Self::Node>;

    fn by_id(&self, id: &str) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Inner markup, preserved verbatim.
    fn markup(&self, node: &Self::Node) -> String;
    fn set_markup(&mut self, node: &Self::Node, markup: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&mut self, node: &Self::Node, class: &str);
    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Flips `class` and returns whether it is now present.
    fn toggle_class(&mut self, node: &Self::Node, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    /// Inline style value, empty when unset.
    fn style(&self, node: &Self::Node, property: &str) -> String;
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);

    fn offset_top(&self, node: &Self::Node) -> f64;

    /// Creates a `tag` element as the last child of `parent`.
    fn append_element(&mut self, parent: &Self::Node, tag: &str) -> Option<Self::Node>;
}
