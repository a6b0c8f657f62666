use crate::{
    constants::DEFAULT_PROJECT_NAME,
    error::Result,
    options::{BuiltinExtension, ExternalExtension, Options},
    prompt::{ConfirmationConfig, PromptProvider, SingleChoiceConfig, TextPromptConfig},
    validation::validate_project_name,
};

/// Value of `--extension` once the built-in keywords are recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionArg {
    /// `none`: the base tree only.
    NoExtension,
    Builtin(BuiltinExtension),
    /// Anything else, resolved later as an external extension.
    External(String),
}

impl ExtensionArg {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("none") {
            return ExtensionArg::NoExtension;
        }
        match raw.parse::<BuiltinExtension>() {
            Ok(extension) => ExtensionArg::Builtin(extension),
            Err(_) => ExtensionArg::External(raw.to_string()),
        }
    }
}

/// Options as far as the command line determined them.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub project: Option<String>,
    /// `Some(None)` when the user explicitly asked for no extension.
    pub extension: Option<Option<BuiltinExtension>>,
    pub install: Option<bool>,
    pub dev: bool,
    pub external_extension: Option<ExternalExtension>,
}

/// Returns `name` if it is a valid project name, otherwise reports why and
/// returns `None` so the name is asked for again.
pub fn accept_project_name(name: Option<String>) -> Option<String> {
    let name = name?;
    let validation = validate_project_name(&name);
    if validation.is_valid() {
        return Some(name);
    }
    eprintln!("Could not create a project called \"{name}\" because of naming restrictions:");
    for problem in &validation.problems {
        eprintln!(">> Project {problem}");
    }
    None
}

/// Fills in whatever the command line left open, by prompting or by defaults.
pub struct OptionCollector<'a, P: PromptProvider> {
    prompter: &'a P,
    non_interactive: bool,
}

impl<'a, P: PromptProvider> OptionCollector<'a, P> {
    pub fn new(prompter: &'a P, non_interactive: bool) -> Self {
        Self { prompter, non_interactive }
    }

    /// Resolves `raw` into complete [`Options`].
    ///
    /// # Arguments
    /// * `raw` - Options taken from the command line
    /// * `choices` - Extensions the user may pick from, in display order
    pub fn collect(&self, raw: RawOptions, choices: &[BuiltinExtension]) -> Result<Options> {
        let project = match raw.project {
            Some(project) => project,
            None => self.ask_project()?,
        };

        let extension = match raw.extension {
            Some(extension) => extension,
            None => self.ask_extension(choices)?,
        };

        let install = match raw.install {
            Some(install) => install,
            None if self.non_interactive => true,
            None => self.prompter.prompt_confirmation(&ConfirmationConfig {
                prompt: "Install packages?".to_string(),
                default: true,
            })?,
        };

        Ok(Options {
            project,
            install,
            dev: raw.dev,
            external_extension: raw.external_extension,
            extension,
        })
    }

    fn ask_project(&self) -> Result<String> {
        if self.non_interactive {
            return Ok(DEFAULT_PROJECT_NAME.to_string());
        }
        let config = TextPromptConfig {
            prompt: "Your project name".to_string(),
            default: Some(DEFAULT_PROJECT_NAME.to_string()),
        };
        loop {
            let name = self.prompter.prompt_text(&config)?;
            let validation = validate_project_name(&name);
            match validation.problems.first() {
                None => return Ok(name),
                Some(problem) => eprintln!("Project {problem}"),
            }
        }
    }

    fn ask_extension(&self, choices: &[BuiltinExtension]) -> Result<Option<BuiltinExtension>> {
        if choices.is_empty() {
            return Ok(None);
        }
        let default_index = choices
            .iter()
            .position(|ext| *ext == BuiltinExtension::HelloWorld)
            .unwrap_or(0);
        if self.non_interactive {
            return Ok(Some(choices[default_index]));
        }

        let index = self.prompter.prompt_single_choice(&SingleChoiceConfig {
            prompt: "What type of contract do you want to create?".to_string(),
            choices: choices.iter().map(ToString::to_string).collect(),
            default_index: Some(default_index),
        })?;
        Ok(choices.get(index).copied())
    }
}
