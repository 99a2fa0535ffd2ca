// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, BezPath, Point, Rect, Size};
use peniko::Color;

/// A node in a [`Scene`].
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// A transformed, faded container of other nodes.
    Group(Group),
    /// A filled path.
    Path(PathNode),
    /// A filled axis-aligned rectangle.
    Rect(RectNode),
    /// A caption anchor. Typesetting is left to the host.
    Caption(Caption),
}

impl Node {
    /// Opacity of this node, not counting its ancestors.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        match self {
            Self::Group(g) => g.opacity,
            Self::Path(p) => p.opacity,
            Self::Rect(r) => r.opacity,
            Self::Caption(c) => c.opacity,
        }
    }

    /// CSS-style class name, if any.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        match self {
            Self::Group(g) => g.class.as_deref(),
            Self::Path(p) => p.class.as_deref(),
            Self::Rect(r) => r.class.as_deref(),
            Self::Caption(c) => Some(&c.class),
        }
    }

    /// Children of a group; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Group(g) => &g.children,
            _ => &[],
        }
    }
}

/// A group of nodes sharing a transform and opacity.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    /// Transform applied to every child.
    pub transform: Affine,
    /// Opacity multiplied into every child.
    pub opacity: f64,
    /// Whether the group is anchored to the viewport rather than scrolling
    /// with the document.
    pub pinned: bool,
    /// Class name.
    pub class: Option<String>,
    /// Children, in paint order.
    pub children: Vec<Node>,
}

impl Group {
    /// Creates an empty, fully opaque, unpinned group.
    #[must_use]
    pub fn new(transform: Affine) -> Self {
        Self {
            transform,
            opacity: 1.0,
            pinned: false,
            class: None,
            children: Vec::new(),
        }
    }

    /// Sets the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Marks the group as pinned to the viewport.
    #[must_use]
    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Sets the class name.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }
}

/// A filled path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathNode {
    /// Geometry.
    pub path: BezPath,
    /// Fill color.
    pub fill: Color,
    /// Opacity.
    pub opacity: f64,
    /// Class name.
    pub class: Option<String>,
}

impl PathNode {
    /// Creates an opaque path.
    #[must_use]
    pub fn new(path: BezPath, fill: Color) -> Self {
        Self {
            path,
            fill,
            opacity: 1.0,
            class: None,
        }
    }

    /// Sets the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the class name.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

/// A filled rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectNode {
    /// Geometry.
    pub rect: Rect,
    /// Fill color.
    pub fill: Color,
    /// Opacity.
    pub opacity: f64,
    /// Class name.
    pub class: Option<String>,
}

impl RectNode {
    /// Creates an opaque rectangle.
    #[must_use]
    pub fn new(rect: Rect, fill: Color) -> Self {
        Self {
            rect,
            fill,
            opacity: 1.0,
            class: None,
        }
    }

    /// Sets the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the class name.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

/// Where a caption goes and how visible it is.
#[derive(Clone, Debug, PartialEq)]
pub struct Caption {
    /// Identifies which caption this is.
    pub class: String,
    /// Text to display.
    pub text: String,
    /// Top-left anchor.
    pub origin: Point,
    /// Opacity.
    pub opacity: f64,
}

impl Caption {
    /// Creates a caption.
    #[must_use]
    pub fn new(
        class: impl Into<String>,
        text: impl Into<String>,
        origin: Point,
        opacity: f64,
    ) -> Self {
        Self {
            class: class.into(),
            text: text.into(),
            origin,
            opacity,
        }
    }
}

impl From<Group> for Node {
    fn from(g: Group) -> Self {
        Self::Group(g)
    }
}

impl From<PathNode> for Node {
    fn from(p: PathNode) -> Self {
        Self::Path(p)
    }
}

impl From<RectNode> for Node {
    fn from(r: RectNode) -> Self {
        Self::Rect(r)
    }
}

impl From<Caption> for Node {
    fn from(c: Caption) -> Self {
        Self::Caption(c)
    }
}

/// An immutable description of what a panel looks like at one instant.
///
/// Build one with [`SceneBuilder`].
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    size: Size,
    nodes: Vec<Node>,
}

impl Scene {
    /// Starts building a scene of the given size.
    #[must_use]
    pub fn builder(size: Size) -> SceneBuilder {
        SceneBuilder {
            size,
            nodes: Vec::new(),
        }
    }

    /// Drawing surface size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Top-level nodes, in paint order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Every node, depth first, in paint order.
    #[must_use]
    pub fn flatten(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack: Vec<&Node> = self.nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children().iter().rev());
        }
        out
    }

    /// Every node with the given class name, depth first.
    pub fn find_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.flatten()
            .into_iter()
            .filter(move |n| n.class() == Some(class))
    }
}

/// Accumulates top-level nodes for a [`Scene`].
#[derive(Clone, Debug)]
pub struct SceneBuilder {
    size: Size,
    nodes: Vec<Node>,
}

impl SceneBuilder {
    /// Appends a top-level node.
    pub fn push(&mut self, node: impl Into<Node>) -> &mut Self {
        self.nodes.push(node.into());
        self
    }

    /// Finishes the scene.
    #[must_use]
    pub fn build(self) -> Scene {
        Scene {
            size: self.size,
            nodes: self.nodes,
        }
    }
}
