use crate::error::Result;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    /// * `template_name` - Optional name for the template (used in error messages)
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String>;

    /// Checks that a template compiles without rendering it.
    ///
    /// # Arguments
    /// * `template` - Template string to check
    /// * `template_name` - Optional name for the template (used in error messages)
    fn check(&self, template: &str, template_name: Option<&str>) -> Result<()>;
}
