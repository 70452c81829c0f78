//! The static catalog of placeable shape templates.
//!
//! Every node on the canvas is instantiated from a template in this registry.
//! Templates are grouped into categories for palette display and carry a
//! default fill color and bilingual default labels. Looking up an unknown
//! template id yields a generic fallback instead of an error, so placement
//! never fails.

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// The geometric footprint a template renders with. Icon-style templates
/// (server, database, ...) all render as rectangles; only the basic circle
/// and diamond templates differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Diamond,
}

impl ShapeKind {
    /// Default size for a freshly placed node of this kind.
    pub fn default_size(self) -> Size {
        match self {
            Self::Circle => Size::new(80.0, 80.0),
            Self::Diamond => Size::new(120.0, 80.0),
            Self::Rectangle => Size::new(120.0, 60.0),
        }
    }
}

/// Palette categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Infrastructure,
    Application,
    Security,
    Users,
    Communication,
    DevOps,
    Basic,
    Status,
}

impl Category {
    /// All categories in palette display order.
    pub fn all() -> &'static [Category] {
        &[
            Self::Infrastructure,
            Self::Application,
            Self::Security,
            Self::Users,
            Self::Communication,
            Self::DevOps,
            Self::Basic,
            Self::Status,
        ]
    }

    /// Human-readable category heading for the given locale.
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Infrastructure, _) => "Infrastructure",
            (Self::Application, _) => "Application",
            (Self::Security, Locale::En) => "Security",
            (Self::Security, Locale::Fr) => "Sécurité",
            (Self::Users, Locale::En) => "Users",
            (Self::Users, Locale::Fr) => "Utilisateurs",
            (Self::Communication, _) => "Communication",
            (Self::DevOps, _) => "DevOps",
            (Self::Basic, Locale::En) => "Basic Shapes",
            (Self::Basic, Locale::Fr) => "Formes de base",
            (Self::Status, Locale::En) => "Status",
            (Self::Status, Locale::Fr) => "État",
        }
    }
}

/// Label locale for freshly placed nodes and palette headings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

/// A placeable shape template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeTemplate {
    pub id: &'static str,
    pub category: Category,
    pub kind: ShapeKind,
    /// Default fill color, as a CSS hex string.
    pub color: &'static str,
    label_en: &'static str,
    label_fr: &'static str,
}

impl ShapeTemplate {
    const fn new(
        id: &'static str,
        category: Category,
        kind: ShapeKind,
        color: &'static str,
        label_en: &'static str,
        label_fr: &'static str,
    ) -> Self {
        Self {
            id,
            category,
            kind,
            color,
            label_en,
            label_fr,
        }
    }

    /// Default node label for the given locale.
    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.label_en,
            Locale::Fr => self.label_fr,
        }
    }
}

/// Fallback template used when an unknown shape id is requested.
const GENERIC: ShapeTemplate = ShapeTemplate::new(
    "rectangle",
    Category::Basic,
    ShapeKind::Rectangle,
    "#06b6d4",
    "Node",
    "Node",
);

use Category::*;
use ShapeKind::*;

static TEMPLATES: &[ShapeTemplate] = &[
    // Infrastructure
    ShapeTemplate::new("server", Infrastructure, Rectangle, "#8b5cf6", "Server", "Serveur"),
    ShapeTemplate::new("database", Infrastructure, Rectangle, "#6366f1", "Database", "Base de données"),
    ShapeTemplate::new("cloud", Infrastructure, Rectangle, "#06b6d4", "Cloud", "Cloud"),
    ShapeTemplate::new("container", Infrastructure, Rectangle, "#0ea5e9", "Container", "Container"),
    ShapeTemplate::new("storage", Infrastructure, Rectangle, "#64748b", "Storage", "Stockage"),
    ShapeTemplate::new("cpu", Infrastructure, Rectangle, "#f97316", "Processor", "Processeur"),
    ShapeTemplate::new("network", Infrastructure, Rectangle, "#14b8a6", "Network", "Réseau"),
    ShapeTemplate::new("warehouse", Infrastructure, Rectangle, "#6b7280", "Data Center", "Data Center"),
    // Application
    ShapeTemplate::new("webapp", Application, Rectangle, "#3b82f6", "Web App", "App Web"),
    ShapeTemplate::new("mobile", Application, Rectangle, "#ec4899", "Mobile App", "App Mobile"),
    ShapeTemplate::new("desktop", Application, Rectangle, "#8b5cf6", "Desktop", "Desktop"),
    ShapeTemplate::new("api", Application, Rectangle, "#f59e0b", "API", "API"),
    ShapeTemplate::new("microservice", Application, Rectangle, "#10b981", "Microservice", "Microservice"),
    ShapeTemplate::new("function", Application, Rectangle, "#a855f7", "Function", "Fonction"),
    ShapeTemplate::new("terminal", Application, Rectangle, "#22c55e", "CLI", "CLI"),
    // Security
    ShapeTemplate::new("shield", Security, Rectangle, "#ef4444", "Security", "Sécurité"),
    ShapeTemplate::new("key", Security, Rectangle, "#eab308", "Auth/Key", "Auth/Clé"),
    ShapeTemplate::new("lock", Security, Rectangle, "#f97316", "Lock", "Verrou"),
    ShapeTemplate::new("firewall", Security, Rectangle, "#dc2626", "Firewall", "Firewall"),
    // Users
    ShapeTemplate::new("user", Users, Rectangle, "#06b6d4", "User", "Utilisateur"),
    ShapeTemplate::new("users", Users, Rectangle, "#ec4899", "Group", "Groupe"),
    ShapeTemplate::new("building", Users, Rectangle, "#6366f1", "Organization", "Organisation"),
    // Communication
    ShapeTemplate::new("message", Communication, Rectangle, "#f59e0b", "Message Queue", "Message Queue"),
    ShapeTemplate::new("email", Communication, Rectangle, "#3b82f6", "Email", "Email"),
    ShapeTemplate::new("wifi", Communication, Rectangle, "#14b8a6", "IoT/WiFi", "IoT/WiFi"),
    // DevOps
    ShapeTemplate::new("git", DevOps, Rectangle, "#f97316", "Git/VCS", "Git/VCS"),
    ShapeTemplate::new("cicd", DevOps, Rectangle, "#22c55e", "CI/CD", "CI/CD"),
    ShapeTemplate::new("settings", DevOps, Rectangle, "#6b7280", "Config", "Config"),
    ShapeTemplate::new("monitoring", DevOps, Rectangle, "#06b6d4", "Monitoring", "Monitoring"),
    // Basic shapes
    ShapeTemplate::new("rectangle", Basic, Rectangle, "#06b6d4", "Rectangle", "Rectangle"),
    ShapeTemplate::new("circle", Basic, Circle, "#10b981", "Circle", "Cercle"),
    ShapeTemplate::new("diamond", Basic, Diamond, "#f59e0b", "Diamond", "Losange"),
    ShapeTemplate::new("folder", Basic, Rectangle, "#eab308", "Folder", "Dossier"),
    // Status
    ShapeTemplate::new("success", Status, Rectangle, "#22c55e", "Success", "Succès"),
    ShapeTemplate::new("error", Status, Rectangle, "#ef4444", "Error", "Erreur"),
    ShapeTemplate::new("warning", Status, Rectangle, "#f59e0b", "Warning", "Warning"),
    ShapeTemplate::new("timer", Status, Rectangle, "#6366f1", "Timer", "Timer"),
];

/// Looks up a template by id.
///
/// Unknown ids resolve to a generic rectangle template so that callers can
/// always place something; the requested id is preserved on the node itself.
pub fn lookup(shape_id: &str) -> &'static ShapeTemplate {
    TEMPLATES
        .iter()
        .find(|template| template.id == shape_id)
        .unwrap_or(&GENERIC)
}

/// All templates, in palette order.
pub fn templates() -> impl Iterator<Item = &'static ShapeTemplate> {
    TEMPLATES.iter()
}

/// Templates belonging to one palette category, in palette order.
pub fn templates_in(category: Category) -> impl Iterator<Item = &'static ShapeTemplate> {
    TEMPLATES
        .iter()
        .filter(move |template| template.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_templates() {
        let server = lookup("server");
        assert_eq!(server.id, "server");
        assert_eq!(server.kind, ShapeKind::Rectangle);
        assert_eq!(server.color, "#8b5cf6");

        let circle = lookup("circle");
        assert_eq!(circle.kind, ShapeKind::Circle);

        let diamond = lookup("diamond");
        assert_eq!(diamond.kind, ShapeKind::Diamond);
    }

    #[test]
    fn test_lookup_unknown_falls_back_to_generic() {
        let template = lookup("no-such-shape");
        assert_eq!(template.kind, ShapeKind::Rectangle);
        assert_eq!(template.color, "#06b6d4");
        assert_eq!(template.label(Locale::En), "Node");
    }

    #[test]
    fn test_template_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for template in templates() {
            assert!(seen.insert(template.id), "duplicate template id {}", template.id);
        }
    }

    #[test]
    fn test_labels_by_locale() {
        let database = lookup("database");
        assert_eq!(database.label(Locale::En), "Database");
        assert_eq!(database.label(Locale::Fr), "Base de données");
    }

    #[test]
    fn test_every_category_has_templates() {
        for category in Category::all() {
            assert!(
                templates_in(*category).next().is_some(),
                "category {category:?} is empty"
            );
        }
    }

    #[test]
    fn test_default_sizes() {
        assert_eq!(ShapeKind::Rectangle.default_size(), Size::new(120.0, 60.0));
        assert_eq!(ShapeKind::Circle.default_size(), Size::new(80.0, 80.0));
        assert_eq!(ShapeKind::Diamond.default_size(), Size::new(120.0, 80.0));
    }

    #[test]
    fn test_template_colors_parse() {
        for template in templates() {
            assert!(
                crate::color::Color::new(template.color).is_ok(),
                "template {} has unparseable color {}",
                template.id,
                template.color
            );
        }
    }
}
