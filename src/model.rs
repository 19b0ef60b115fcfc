//! Authored content records for the spatial canvas.
//! Records are immutable for the lifetime of a session; all interaction state
//! lives in side tables under `crate::state` keyed by the same ids.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Screen-space rectangle, used as the origin of full-screen transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// True when the rectangle has a usable, finite area.
    pub fn is_laid_out(&self) -> bool {
        [self.left, self.top, self.width, self.height].iter().all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Bio,
    Project,
    Skill,
    Contact,
    Experience,
    ProjectHub,
    ExperienceHub,
}

impl NodeKind {
    pub fn is_hub(self) -> bool {
        matches!(self, NodeKind::ProjectHub | NodeKind::ExperienceHub)
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Bio => "bio",
            NodeKind::Project => "project",
            NodeKind::Skill => "skill",
            NodeKind::Contact => "contact",
            NodeKind::Experience => "experience",
            NodeKind::ProjectHub => "project-hub",
            NodeKind::ExperienceHub => "experience-hub",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Iframe,
    Demo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub kind: MediaKind,
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub title: String,
    pub kind: NodeKind,
    /// Markdown-ish body, rendered by the presentation layer.
    pub content: String,
    /// Authored world position; the live position lives in `NodePositions`.
    pub position: Point,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    /// Hidden nodes only exist in the world once opened.
    #[serde(default)]
    pub hidden: bool,
}

impl NodeRecord {
    pub fn new(id: &str, title: &str, kind: NodeKind, position: Point) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            content: String::new(),
            position,
            width: None,
            media: None,
            gallery: Vec::new(),
            tags: Vec::new(),
            links: Vec::new(),
            hidden: false,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Permanent nodes treat close as minimize; transient ones are removed.
    pub fn is_permanent(&self) -> bool {
        !self.hidden
    }
}

pub const HERO_ID: &str = "hero";
pub const PROJECTS_HUB_ID: &str = "projects-hub";
pub const EXPERIENCE_HUB_ID: &str = "experience-hub";

/// The authored portfolio layout.
pub fn portfolio_nodes() -> Vec<NodeRecord> {
    vec![
        NodeRecord::new(PROJECTS_HUB_ID, "projects/README.md", NodeKind::ProjectHub, Point::new(0.0, 0.0))
            .with_width(600.0)
            .with_content("# Projects\nSelected work. Open an entry to spawn its window."),
        NodeRecord::new(EXPERIENCE_HUB_ID, "experience/log.json", NodeKind::ExperienceHub, Point::new(650.0, 0.0))
            .with_width(600.0)
            .with_content("# Experience\n- Senior UX Engineer\n- Creative Developer\n- Frontend Developer"),
        NodeRecord::new("contact", "contact.tsx", NodeKind::Contact, Point::new(1300.0, 0.0))
            .with_width(400.0)
            .with_content("# Contact\nSay hello."),
        NodeRecord::new("skills", "stack.yml", NodeKind::Skill, Point::new(0.0, 550.0))
            .with_width(450.0)
            .with_content("# Stack\n- Rust / WASM\n- TypeScript\n- WebGL")
            .with_tags(&["Rust", "WASM", "WebGL"]),
        NodeRecord::new(HERO_ID, "README.md", NodeKind::Bio, Point::new(500.0, 550.0))
            .with_width(650.0)
            .with_content("# Hello\nUX engineer building interfaces between design and code."),
        NodeRecord::new("proj-1", "projects/fluid-brand.glsl", NodeKind::Project, Point::new(0.0, 0.0))
            .with_width(500.0)
            .with_content("# Fluid Identity System\nGenerative branding using real-time fluid simulation shaders.")
            .with_tags(&["WebGL", "Three.js", "React"])
            .hidden(),
        NodeRecord::new("proj-2", "projects/poly-dashboard.tsx", NodeKind::Project, Point::new(0.0, 0.0))
            .with_width(480.0)
            .with_content("# Poly Analytics\nFull-stack analytics platform with WebSocket collaboration.")
            .with_tags(&["Angular", "Python", "Postgres"])
            .hidden(),
    ]
}
