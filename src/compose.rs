//! The composition engine: base tree, then a built-in extension, then an
//! external extension, then templated files, then a fresh repository.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::classify::FileRole;
use crate::config::ToolPaths;
use crate::constants::{
    BUILD_DESCRIPTOR_FILES, EXTERNAL_EXTENSION_ROOT, EXTERNAL_EXTENSION_TMP_DIR, GITMODULES_FILE,
    MANIFEST_FILE, PACKAGES_DIR, PACKAGE_README_FILE, PRIMARY_BRANCH, ROOT_README_FILE,
    SOURCE_STUB_FILES,
};
use crate::copy::{copy_tree, CopyStrategy};
use crate::error::Result;
use crate::ext::PathExt;
use crate::git::VersionControl;
use crate::ioutils::{create_dir_all, create_project_dir, find_files_recursive, replace_file};
use crate::loader::{ExtensionLoader, GitLoader, LocalLoader};
use crate::merge::{copy_file_if_exists, merge_gitmodules, merge_manifest, replace_if_present};
use crate::options::{ExternalExtension, Options};
use crate::renderer::TemplateRenderer;
use crate::template::{TemplateDescriptor, TemplateProcessor, TemplateRegistry};

/// Never copied from an extension root.
const EXTENSION_ROOT_EXCLUDED: [FileRole; 8] = [
    FileRole::ExtensionConfig,
    FileRole::Args,
    FileRole::Template,
    FileRole::Manifest,
    FileRole::ExtensionsDir,
    FileRole::PackagesDir,
    FileRole::Gitmodules,
    FileRole::Readme,
];

/// Never copied from an extension's `packages/` subtree.
const EXTENSION_PACKAGES_EXCLUDED: [FileRole; 5] = [
    FileRole::Args,
    FileRole::Template,
    FileRole::Manifest,
    FileRole::Gitmodules,
    FileRole::Readme,
];

/// An extension tree being layered onto the project.
struct Layer {
    root: PathBuf,
    label: String,
}

pub struct Composer<'a> {
    /// Dependencies
    paths: &'a ToolPaths,
    vcs: &'a dyn VersionControl,
    engine: &'a dyn TemplateRenderer,
    registry: &'a TemplateRegistry,
}

impl<'a> Composer<'a> {
    pub fn new(
        paths: &'a ToolPaths,
        vcs: &'a dyn VersionControl,
        engine: &'a dyn TemplateRenderer,
        registry: &'a TemplateRegistry,
    ) -> Self {
        Self { paths, vcs, engine, registry }
    }

    /// Builds the project at `target_dir`, which must not exist yet.
    ///
    /// A failure aborts the remaining steps and leaves whatever was already
    /// written in place.
    ///
    /// # Arguments
    /// * `options` - Fully resolved run options
    /// * `target_dir` - Project directory to create
    pub fn compose(&self, options: &Options, target_dir: &Path) -> Result<()> {
        let target_dir = create_project_dir(target_dir)?;
        let strategy = CopyStrategy::for_mode(options.dev);
        let base_dir = self.paths.base_dir();

        info!("Copying base template");
        self.copy_base(&base_dir, &target_dir, strategy, options.dev)?;

        let extension = match options.extension {
            Some(extension) => {
                let root = LocalLoader::new(self.paths.extension_dir(extension)).load()?;
                info!("Copying extension {extension}");
                self.copy_extension(&root, &target_dir, strategy, options.dev)?;
                Some(Layer { root, label: format!("extension {extension}") })
            }
            None => None,
        };

        let mut scratch = None;
        let external = match &options.external_extension {
            Some(external) => {
                let root = match external {
                    ExternalExtension::Remote(remote) => {
                        let dir = tempfile::Builder::new()
                            .prefix(EXTERNAL_EXTENSION_TMP_DIR)
                            .tempdir_in(&target_dir)?;
                        let root = GitLoader::new(self.vcs, remote, dir.path()).load()?;
                        scratch = Some(dir);
                        root
                    }
                    ExternalExtension::Local(name) => {
                        let dir = self.paths.external_extensions_dir.join(name);
                        LocalLoader::new(dir.join(EXTERNAL_EXTENSION_ROOT)).load()?
                    }
                };
                info!("Copying external extension {external}");
                self.copy_extension(&root, &target_dir, strategy, options.dev)?;
                Some(Layer { root, label: format!("external extension {external}") })
            }
            None => None,
        };

        info!("Rendering templated files");
        self.render_templates(
            &base_dir,
            extension.as_ref(),
            external.as_ref(),
            &target_dir,
            options.dev,
        )?;

        if let Some(dir) = scratch {
            debug!("Removing '{}'", dir.path().display());
            dir.close()?;
        }

        info!("Initialising git repository");
        self.vcs.init_repository(&target_dir, PRIMARY_BRANCH)?;
        Ok(())
    }

    /// Step 1: the base tree, without templates.
    ///
    /// In dev mode lockfiles are copied rather than linked and manifests go
    /// through the manifest merge so each project owns independent copies.
    fn copy_base(&self, base: &Path, target: &Path, strategy: CopyStrategy, dev: bool) -> Result<()> {
        copy_tree(base, target, strategy, |relative, is_dir| {
            FileRole::Template.matches(relative, is_dir)
                || (dev
                    && (FileRole::Lockfile.matches(relative, is_dir)
                        || FileRole::Manifest.matches(relative, is_dir)))
        })?;

        if !dev {
            return Ok(());
        }

        let lockfiles = find_files_recursive(base, |path| {
            path.relative_to(base).is_ok_and(|rel| FileRole::Lockfile.matches(&rel, false))
        })?;
        for lockfile in lockfiles {
            let destination = target.join(lockfile.relative_to(base)?);
            if let Some(parent) = destination.parent() {
                create_dir_all(parent)?;
            }
            replace_file(&lockfile, &destination)?;
        }

        let manifests = find_files_recursive(base, |path| {
            path.relative_to(base).is_ok_and(|rel| FileRole::Manifest.matches(&rel, false))
        })?;
        for manifest in manifests {
            merge_manifest(&target.join(manifest.relative_to(base)?), &manifest, dev)?;
        }
        Ok(())
    }

    /// Step 2 (and 3): layer one extension tree onto the project.
    fn copy_extension(&self, root: &Path, target: &Path, strategy: CopyStrategy, dev: bool) -> Result<()> {
        copy_tree(root, target, strategy, |relative, is_dir| {
            FileRole::any(&EXTENSION_ROOT_EXCLUDED, relative, is_dir)
        })?;

        merge_gitmodules(&target.join(GITMODULES_FILE), &root.join(GITMODULES_FILE));
        replace_if_present(&target.join(ROOT_README_FILE), &root.join(ROOT_README_FILE));
        merge_manifest(&target.join(MANIFEST_FILE), &root.join(MANIFEST_FILE), dev)?;

        let packages = root.join(PACKAGES_DIR);
        if !packages.is_dir() {
            return Ok(());
        }

        let target_packages = target.join(PACKAGES_DIR);
        copy_tree(&packages, &target_packages, strategy, |relative, is_dir| {
            FileRole::any(&EXTENSION_PACKAGES_EXCLUDED, relative, is_dir)
        })?;

        let mut package_dirs = Vec::new();
        for entry in std::fs::read_dir(&packages)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                package_dirs.push(entry.file_name());
            }
        }
        package_dirs.sort();

        for name in package_dirs {
            self.merge_package(&packages.join(&name), &target_packages.join(&name), dev)?;
        }
        Ok(())
    }

    /// Per-package merges: manifest, `.gitmodules`, README, then the source
    /// stubs and build descriptors the extension replaces outright.
    fn merge_package(&self, extension_package: &Path, package: &Path, dev: bool) -> Result<()> {
        debug!("Merging package '{}'", package.display());
        merge_manifest(&package.join(MANIFEST_FILE), &extension_package.join(MANIFEST_FILE), dev)?;
        merge_gitmodules(&package.join(GITMODULES_FILE), &extension_package.join(GITMODULES_FILE));
        replace_if_present(
            &package.join(PACKAGE_README_FILE),
            &extension_package.join(PACKAGE_README_FILE),
        );

        let extension_src = extension_package.join("src");
        if extension_src.is_dir() {
            let target_src = package.join("src");
            for file in SOURCE_STUB_FILES {
                copy_file_if_exists(&extension_src, &target_src, file);
            }
        }
        for file in BUILD_DESCRIPTOR_FILES {
            copy_file_if_exists(extension_package, package, file);
        }
        Ok(())
    }

    /// Step 4: render every template from every root, base first.
    ///
    /// Args come from the extension and then the external extension.
    fn render_templates(
        &self,
        base: &Path,
        extension: Option<&Layer>,
        external: Option<&Layer>,
        target: &Path,
        dev: bool,
    ) -> Result<usize> {
        let mut descriptors = TemplateDescriptor::discover(base, "base")?;
        let mut args_roots = Vec::new();
        for layer in [extension, external].into_iter().flatten() {
            descriptors.extend(TemplateDescriptor::discover(&layer.root, &layer.label)?);
            args_roots.push(layer.root.clone());
        }

        TemplateProcessor::new(self.engine, self.registry, args_roots, target, dev)
            .render_all(&descriptors)
    }
}
