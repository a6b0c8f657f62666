use super::filters::*;
use crate::{error::Result, renderer::interface::TemplateRenderer};
use minijinja::{AutoEscape, Environment};

const DEFAULT_TEMPLATE_NAME: &str = "temp";

/// MiniJinja-based template rendering engine.
///
/// Generated files are source code, not markup, so auto-escaping is always off.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer instance with default environment.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        env.add_filter("camel_case", to_camel_case);
        env.add_filter("kebab_case", to_kebab_case);
        env.add_filter("pascal_case", to_pascal_case);
        env.add_filter("screaming_snake_case", to_screaming_snake_case);
        env.add_filter("snake_case", to_snake_case);

        Self { env }
    }

    fn environment_with(&self, template: &str, name: &str) -> Result<Environment<'static>> {
        let mut env = self.env.clone();
        env.add_template_owned(name.replace('\\', "/"), template.to_string())?;
        Ok(env)
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String> {
        let name = template_name.unwrap_or(DEFAULT_TEMPLATE_NAME).replace('\\', "/");
        let env = self.environment_with(template, &name)?;
        let tmpl = env.get_template(&name)?;
        Ok(tmpl.render(context)?)
    }

    fn check(&self, template: &str, template_name: Option<&str>) -> Result<()> {
        self.environment_with(template, template_name.unwrap_or(DEFAULT_TEMPLATE_NAME))
            .map(|_| ())
    }
}
