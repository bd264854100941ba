use std::collections::HashMap;

/// Icon name assigned to freshly created custom fields, and the glyph any
/// unknown name falls back to.
pub const DEFAULT_ICON: &str = "star";

/// A renderable icon: the registry key plus the glyph a renderer draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub name: String,
    pub glyph: String,
}

impl Icon {
    pub fn new(name: impl Into<String>, glyph: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            glyph: glyph.into(),
        }
    }
}

/// Maps icon names to icons. Lookups never fail: unresolvable names
/// resolve to the fallback entry.
#[derive(Debug, Clone)]
pub struct IconRegistry {
    icons: HashMap<String, Icon>,
    fallback: Icon,
}

impl IconRegistry {
    /// An empty registry that resolves everything to `fallback`.
    pub fn with_fallback(fallback: Icon) -> Self {
        let mut icons = HashMap::new();
        icons.insert(fallback.name.clone(), fallback.clone());
        Self { icons, fallback }
    }

    pub fn register(&mut self, icon: Icon) {
        self.icons.insert(icon.name.clone(), icon);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.icons.contains_key(name)
    }

    pub fn resolve(&self, name: &str) -> &Icon {
        self.icons.get(name).unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &Icon {
        &self.fallback
    }

    /// Registered icon names, sorted for stable picker ordering.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.icons.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for IconRegistry {
    fn default() -> Self {
        let mut registry = Self::with_fallback(Icon::new(DEFAULT_ICON, "★"));
        for (name, glyph) in [
            ("award", "🏆"),
            ("book", "📖"),
            ("briefcase", "💼"),
            ("calendar", "📅"),
            ("code", "⌨"),
            ("github", "🐙"),
            ("globe", "🌐"),
            ("language", "🗣"),
            ("link", "🔗"),
            ("linkedin", "in"),
            ("location", "📍"),
            ("mail", "✉"),
            ("phone", "☎"),
        ] {
            registry.register(Icon::new(name, glyph));
        }
        registry
    }
}
