use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::classify::args_path_for;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;

use super::args::{ArgsFile, CombinedArgs};
use super::descriptor::TemplateDescriptor;
use super::operation::RenderedTemplate;
use super::registry::TemplateRegistry;

pub struct TemplateProcessor<'a> {
    /// Dependencies
    engine: &'a dyn TemplateRenderer,
    registry: &'a TemplateRegistry,

    /// Roots that may contribute args files, in load order.
    args_roots: Vec<PathBuf>,
    output_root: &'a Path,
    dev: bool,
}

impl<'a> TemplateProcessor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        registry: &'a TemplateRegistry,
        args_roots: Vec<PathBuf>,
        output_root: &'a Path,
        dev: bool,
    ) -> Self {
        Self { engine, registry, args_roots, output_root, dev }
    }

    /// Loads the args files paired with `descriptor` from every args root.
    ///
    /// A root without the file simply contributes nothing.
    fn collect_args(&self, descriptor: &TemplateDescriptor) -> Result<Vec<ArgsFile>> {
        let Some(args_path) = args_path_for(&descriptor.relative_path) else {
            return Ok(Vec::new());
        };

        let mut files = Vec::new();
        for root in &self.args_roots {
            let candidate = root.join(&args_path);
            if candidate.is_file() {
                debug!("Using args '{}' for '{}'", candidate.display(), descriptor.output_path);
                files.push(ArgsFile::load(&candidate)?);
            }
        }
        Ok(files)
    }

    /// Produces the template's content.
    ///
    /// A function registered for the template id wins over the file body. A
    /// blank body with nothing registered has no renderer at all, and a body
    /// that does not compile cannot be rendered; both abort the run.
    fn render_content(
        &self,
        descriptor: &TemplateDescriptor,
        args: &CombinedArgs,
    ) -> Result<String> {
        if let Some(render) = self.registry.get(&descriptor.output_path) {
            return render(args);
        }

        let body = std::fs::read_to_string(&descriptor.path)?;
        if body.trim().is_empty() {
            return Err(Error::TemplateWithoutRenderer {
                template: descriptor.target_name(),
                source_label: descriptor.source.clone(),
            });
        }

        self.engine.check(&body, Some(&descriptor.relative_path)).map_err(|e| {
            Error::TemplateNotRenderable {
                template: descriptor.target_name(),
                source_label: descriptor.source.clone(),
                reason: e.to_string(),
            }
        })?;
        self.engine.render(&body, &args.to_context(), Some(&descriptor.relative_path))
    }

    fn dev_sidecar(
        descriptor: &TemplateDescriptor,
        args_files: &[ArgsFile],
        args: &CombinedArgs,
    ) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "--- TEMPLATE FILE");
        let _ = writeln!(out, "{} ({})", descriptor.path.display(), descriptor.source);
        let _ = writeln!(out, "\n\n--- ARGS FILES");
        if args_files.is_empty() {
            let _ = writeln!(out, "(no args files writing to the template)");
        }
        for file in args_files {
            let _ = writeln!(out, "\t- {}", file.path.display());
        }
        let _ = writeln!(out, "\n\n--- RESULTING ARGS");
        if args.is_empty() {
            let _ = writeln!(out, "(no args sent for the template)");
        }
        for (name, values) in args.iter() {
            let _ = writeln!(out, "\t- {name}:\t[{}]", values.join(","));
        }
        out
    }

    /// Renders one template without touching the filesystem.
    ///
    /// # Arguments
    /// * `descriptor` - The template to render
    ///
    /// # Returns
    /// * `Result<RenderedTemplate>` - Output path, content and optional dev sidecar
    pub fn process(&self, descriptor: &TemplateDescriptor) -> Result<RenderedTemplate> {
        let args_files = self.collect_args(descriptor)?;
        let args = CombinedArgs::combine(&args_files);
        let content = self.render_content(descriptor, &args)?;

        Ok(RenderedTemplate {
            target: self.output_root.join(&descriptor.output_path),
            content,
            dev_sidecar: self.dev.then(|| Self::dev_sidecar(descriptor, &args_files, &args)),
        })
    }

    /// Renders and writes every descriptor in order.
    ///
    /// Descriptors sharing an output path are written in sequence, so the last
    /// one wins.
    ///
    /// # Returns
    /// * `Result<usize>` - Number of templates written
    pub fn render_all(&self, descriptors: &[TemplateDescriptor]) -> Result<usize> {
        for descriptor in descriptors {
            self.process(descriptor)?.write()?;
        }
        info!("Rendered {} templated files", descriptors.len());
        Ok(descriptors.len())
    }
}
