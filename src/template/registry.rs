use std::collections::HashMap;
use std::fmt;

use crate::error::Result;

use super::args::CombinedArgs;

/// A native render function for one template.
pub type RenderFn = dyn Fn(&CombinedArgs) -> Result<String> + Send + Sync;

/// Render functions keyed by template id.
///
/// A template id is the output path relative to the project root, e.g.
/// `packages/nextjs/scaffold.config.ts`. A registered function is used in place
/// of the template file's own body.
#[derive(Default)]
pub struct TemplateRegistry {
    renderers: HashMap<String, Box<RenderFn>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `render` for `id`, replacing any earlier registration.
    pub fn register<S, F>(&mut self, id: S, render: F) -> &mut Self
    where
        S: Into<String>,
        F: Fn(&CombinedArgs) -> Result<String> + Send + Sync + 'static,
    {
        self.renderers.insert(id.into().replace('\\', "/"), Box::new(render));
        self
    }

    pub fn get(&self, id: &str) -> Option<&RenderFn> {
        self.renderers.get(id).map(Box::as_ref)
    }
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.renderers.keys().collect();
        ids.sort();
        f.debug_struct("TemplateRegistry").field("ids", &ids).finish()
    }
}
