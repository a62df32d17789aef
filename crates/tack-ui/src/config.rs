/// Scene-wide settings shared by every component's render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Prefix for generated class names (`"t"` → `"t-affix"`).
    pub class_prefix: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { class_prefix: "t".to_string() }
    }
}

impl UiConfig {
    pub fn class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Prefixed class name for `component`.
    pub fn class_name(&self, component: &str) -> String {
        format!("{}-{}", self.class_prefix, component)
    }
}
