use crate::{
    cli::{
        answers::{accept_project_name, ExtensionArg, OptionCollector, RawOptions},
        messages::{render_intro_message, render_outro_message},
        tasks::{format_files, install_packages},
        Args,
    },
    compose::Composer,
    config::ToolPaths,
    constants::FIRST_COMMIT_MESSAGE,
    error::Result,
    external::{trust_advisory, CuratedRegistry, ExtensionResolver, HttpProbe},
    git::{Git2, VersionControl},
    options::{BuiltinExtension, Options},
    prompt::get_prompt_provider,
    renderer::MiniJinjaRenderer,
    template::TemplateRegistry,
};
use log::debug;
use std::path::{Path, PathBuf};

/// Main CLI runner that orchestrates the whole scaffolding workflow
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Executes the complete scaffolding workflow
    pub fn run(self) -> Result<()> {
        render_intro_message();

        let paths = ToolPaths::resolve(self.args.templates_dir.as_deref())?;
        let curated = CuratedRegistry::builtin()?;
        let probe = HttpProbe::new()?;
        let resolver = ExtensionResolver::new(&probe, &curated, &paths.external_extensions_dir);

        let (raw, choices) = self.parse_raw_options(&resolver)?;
        let prompter = get_prompt_provider();
        let options =
            OptionCollector::new(&prompter, self.args.non_interactive).collect(raw, &choices)?;
        debug!("Resolved options: {options:?}");

        let target_dir = self.target_dir(&options)?;
        let vcs = Git2;
        self.create_project(&paths, &vcs, &options, &target_dir)?;

        if options.install {
            install_packages(&target_dir)?;
            format_files(&target_dir)?;
        }
        vcs.commit_all(&target_dir, FIRST_COMMIT_MESSAGE)?;

        render_outro_message(&options);
        Ok(())
    }

    /// Interprets the command line and works out which extensions may be picked.
    ///
    /// With an external extension that provides sub-extensions, only those
    /// are offered; otherwise every built-in extension is.
    fn parse_raw_options(
        &self,
        resolver: &ExtensionResolver,
    ) -> Result<(RawOptions, Vec<BuiltinExtension>)> {
        let mut raw = RawOptions {
            project: accept_project_name(self.args.project.clone()),
            install: self.args.skip_install.then_some(false),
            dev: self.args.dev,
            ..RawOptions::default()
        };

        match self.args.extension.as_deref().map(ExtensionArg::parse) {
            Some(ExtensionArg::NoExtension) => raw.extension = Some(None),
            Some(ExtensionArg::Builtin(extension)) => raw.extension = Some(Some(extension)),
            Some(ExtensionArg::External(id)) => {
                let external = resolver.resolve(&id, self.args.dev)?;
                if let Some(advisory) = trust_advisory(&external) {
                    eprintln!("{advisory}");
                }
                raw.external_extension = Some(external);
            }
            None => {}
        }

        let mut choices = BuiltinExtension::ALL.to_vec();
        if let Some(external) = &raw.external_extension {
            let provided = resolver.list_sub_extensions(external)?;
            if !provided.is_empty() {
                choices = provided;
            }
        }
        Ok((raw, choices))
    }

    fn target_dir(&self, options: &Options) -> Result<PathBuf> {
        Ok(std::env::current_dir()?.join(&options.project))
    }

    fn create_project(
        &self,
        paths: &ToolPaths,
        vcs: &dyn VersionControl,
        options: &Options,
        target_dir: &Path,
    ) -> Result<()> {
        let engine = MiniJinjaRenderer::new();
        let templates = TemplateRegistry::new();
        Composer::new(paths, vcs, &engine, &templates).compose(options, target_dir)?;
        println!("Project files created in {}.", target_dir.display());
        Ok(())
    }
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<()> {
    let runner = Runner::new(args);
    runner.run()
}
