use create_stylus::error::Error;
use create_stylus::options::{BuiltinExtension, ExternalExtension, Options, RemoteExtension};
use create_stylus::template::TemplateRegistry;
use serde_json::{json, Value};
use std::fs;
use test_log::test;
mod utils;
use utils::{
    assert_same_tree, compose, compose_with, list_files, read, FakeVcs, TemplateFixture,
};

const CONFIG_TEMPLATE: &str = "packages/nextjs/scaffold.config.template.ts";
const CONFIG_ARGS: &str = "packages/nextjs/scaffold.config.args.ts";
const CONFIG_OUTPUT: &str = "packages/nextjs/scaffold.config.ts";

const LINES_TEMPLATE: &str = "{% for line in preConfigContent %}{{ line }}\n{% endfor %}";

fn base_fixture() -> TemplateFixture {
    TemplateFixture::new().base(&[
        ("package.json", r#"{"name":"base","scripts":{"chain":"yarn chain"}}"#),
        ("readme.md", "base readme"),
        ("yarn.lock", "# lockfile"),
        (".gitmodules", "[submodule \"nitro-devnode\"]"),
        ("packages/nextjs/page.tsx", "base page"),
        ("packages/nextjs/package.json", r#"{"dependencies":{"next":"15"}}"#),
        ("packages/stylus/README.md", "base contract readme"),
        ("packages/stylus/Cargo.toml", "[package]\nname = \"base\""),
        ("packages/stylus/src/lib.rs", "// base contract"),
        (CONFIG_TEMPLATE, "export const config = 1;\n"),
    ])
}

fn compose_default(
    fixture: &TemplateFixture,
    options: &Options,
) -> create_stylus::error::Result<(tempfile::TempDir, std::path::PathBuf)> {
    compose_with(fixture, &FakeVcs::default(), &TemplateRegistry::new(), options)
}

fn manifest(root: &std::path::Path, relative: &str) -> Value {
    serde_json::from_str(&read(root, relative)).unwrap()
}

fn remote(repository: &str, branch: Option<&str>) -> ExternalExtension {
    ExternalExtension::Remote(RemoteExtension {
        repository: repository.to_string(),
        branch: branch.map(str::to_string),
        trusted: false,
    })
}

#[test]
fn base_only_project_contains_exactly_the_base_tree() {
    let fixture = base_fixture();
    let (_out, target) = compose(&fixture, &Options::new("my-dapp"));

    assert_eq!(
        list_files(&target),
        vec![
            ".gitmodules",
            "package.json",
            "packages/nextjs/package.json",
            "packages/nextjs/page.tsx",
            "packages/nextjs/scaffold.config.ts",
            "packages/stylus/Cargo.toml",
            "packages/stylus/README.md",
            "packages/stylus/src/lib.rs",
            "readme.md",
            "yarn.lock",
        ]
    );
    assert_eq!(read(&target, CONFIG_OUTPUT), "export const config = 1;\n");
    assert_same_tree(&target.join("packages/stylus"), &fixture.base_dir().join("packages/stylus"));
}

#[test]
fn project_repository_is_initialised_on_main() {
    let (_out, target) = compose(&base_fixture(), &Options::new("my-dapp"));
    assert_eq!(read(&target, ".git/HEAD").trim(), "ref: refs/heads/main");
}

#[test]
fn existing_target_directory_is_fatal() {
    let fixture = base_fixture();
    let out = tempfile::TempDir::new().unwrap();
    let vcs = FakeVcs::default();
    let engine = create_stylus::renderer::MiniJinjaRenderer::new();
    let registry = TemplateRegistry::new();
    let paths = fixture.paths();
    let composer = create_stylus::compose::Composer::new(&paths, &vcs, &engine, &registry);

    let result = composer.compose(&Options::new("my-dapp"), out.path());
    assert!(matches!(result, Err(Error::OutputDirectoryExistsError { .. })));
}

#[test]
fn extension_replaces_contract_source_and_build_descriptor() {
    let fixture = base_fixture().extension(
        "erc20",
        &[
            ("packages/stylus/src/lib.rs", "// erc20 contract"),
            ("packages/stylus/Cargo.toml", "[package]\nname = \"erc20\""),
            ("packages/stylus/src/token.rs", "// token helpers"),
            ("config.json", "{}"),
            ("notes.md", "extension notes"),
        ],
    );
    let options = Options::new("my-dapp").with_extension(BuiltinExtension::Erc20);
    let (_out, target) = compose(&fixture, &options);

    assert_eq!(read(&target, "packages/stylus/src/lib.rs"), "// erc20 contract");
    assert_eq!(read(&target, "packages/stylus/Cargo.toml"), "[package]\nname = \"erc20\"");
    assert_eq!(read(&target, "packages/stylus/src/token.rs"), "// token helpers");
    assert_eq!(read(&target, "notes.md"), "extension notes");
    assert!(!target.join("config.json").exists());
}

#[test]
fn regular_files_are_never_overwritten_by_extensions() {
    let fixture = base_fixture().extension(
        "erc721",
        &[("packages/nextjs/page.tsx", "erc721 page"), ("yarn.lock", "# other lockfile")],
    );
    let options = Options::new("my-dapp").with_extension(BuiltinExtension::Erc721);
    let (_out, target) = compose(&fixture, &options);

    assert_eq!(read(&target, "packages/nextjs/page.tsx"), "base page");
    assert_eq!(read(&target, "yarn.lock"), "# lockfile");
}

#[test]
fn manifests_are_deep_merged_at_root_and_per_package() {
    let fixture = base_fixture().extension(
        "erc20",
        &[
            ("package.json", r#"{"scripts":{"deploy":"yarn deploy"}}"#),
            ("packages/nextjs/package.json", r#"{"dependencies":{"viem":"2"}}"#),
        ],
    );
    let options = Options::new("my-dapp").with_extension(BuiltinExtension::Erc20);
    let (_out, target) = compose(&fixture, &options);

    assert_eq!(
        manifest(&target, "package.json"),
        json!({"name": "base", "scripts": {"chain": "yarn chain", "deploy": "yarn deploy"}})
    );
    assert_eq!(
        manifest(&target, "packages/nextjs/package.json"),
        json!({"dependencies": {"next": "15", "viem": "2"}})
    );
}

#[test]
fn gitmodules_are_concatenated_and_readmes_replaced() {
    let fixture = base_fixture().extension(
        "erc721",
        &[
            (".gitmodules", "[submodule \"openzeppelin\"]"),
            ("readme.md", "erc721 readme"),
            ("packages/stylus/README.md", "erc721 contract readme"),
        ],
    );
    let options = Options::new("my-dapp").with_extension(BuiltinExtension::Erc721);
    let (_out, target) = compose(&fixture, &options);

    assert_eq!(
        read(&target, ".gitmodules"),
        "[submodule \"nitro-devnode\"]\n[submodule \"openzeppelin\"]"
    );
    assert_eq!(read(&target, "readme.md"), "erc721 readme");
    assert_eq!(read(&target, "packages/stylus/README.md"), "erc721 contract readme");
}

#[test]
fn extension_without_readme_keeps_base_readme() {
    let fixture = base_fixture().extension("multicall", &[("packages/stylus/src/lib.rs", "// mc")]);
    let options = Options::new("my-dapp").with_extension(BuiltinExtension::Multicall);
    let (_out, target) = compose(&fixture, &options);

    assert_eq!(read(&target, "readme.md"), "base readme");
    assert_eq!(read(&target, "packages/stylus/README.md"), "base contract readme");
}

#[test]
fn args_from_extension_then_external_reach_base_template() {
    let fixture = base_fixture()
        .base(&[(CONFIG_TEMPLATE, LINES_TEMPLATE)])
        .extension("erc20", &[(CONFIG_ARGS, "preConfigContent: from-extension")]);
    let vcs = FakeVcs::with_remote_tree(&[(
        "extension/packages/nextjs/scaffold.config.args.ts",
        "preConfigContent: from-external",
    )]);
    let options = Options::new("my-dapp")
        .with_extension(BuiltinExtension::Erc20)
        .with_external_extension(remote("https://github.com/owner/ext", Some("main")));

    let (_out, target) =
        compose_with(&fixture, &vcs, &TemplateRegistry::new(), &options).unwrap();

    assert_eq!(read(&target, CONFIG_OUTPUT), "from-extension\nfrom-external\n");
    assert!(!target.join(CONFIG_ARGS).exists());
}

#[test]
fn later_template_provenance_wins() {
    let fixture = base_fixture()
        .extension("erc20", &[(CONFIG_TEMPLATE, "from extension\n")]);
    let options = Options::new("my-dapp").with_extension(BuiltinExtension::Erc20);
    let (_out, target) = compose(&fixture, &options);

    assert_eq!(read(&target, CONFIG_OUTPUT), "from extension\n");
    assert!(!target.join(CONFIG_TEMPLATE).exists());
}

#[test]
fn registered_render_function_overrides_template_body() {
    let fixture = base_fixture()
        .base(&[(CONFIG_TEMPLATE, "")])
        .extension("erc20", &[(CONFIG_ARGS, "preConfigContent: native")]);
    let mut registry = TemplateRegistry::new();
    registry.register(CONFIG_OUTPUT, |args| {
        Ok(format!("// {}\n", args.get("preConfigContent").unwrap_or_default().join(",")))
    });
    let options = Options::new("my-dapp").with_extension(BuiltinExtension::Erc20);

    let (_out, target) =
        compose_with(&fixture, &FakeVcs::default(), &registry, &options).unwrap();

    assert_eq!(read(&target, CONFIG_OUTPUT), "// native\n");
}

#[test]
fn blank_template_without_renderer_aborts() {
    let fixture = base_fixture().base(&[(CONFIG_TEMPLATE, "  \n")]);
    let err = compose_default(&fixture, &Options::new("my-dapp")).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Template scaffold.config.ts from base doesn't have a default export"
    );
}

#[test]
fn uncompilable_template_aborts() {
    let fixture = base_fixture().base(&[(CONFIG_TEMPLATE, "{% if %}")]);
    let err = compose_default(&fixture, &Options::new("my-dapp")).unwrap_err();

    assert!(matches!(err, Error::TemplateNotRenderable { .. }));
}

#[test]
fn remote_extension_is_cloned_layered_and_scratch_removed() {
    let vcs = FakeVcs::with_remote_tree(&[
        ("NOTES.md", "repository notes, outside the extension"),
        ("extension/packages/nextjs/hooks.ts", "// remote hooks"),
        ("extension/package.json", r#"{"scripts":{"lint":"yarn lint"}}"#),
    ]);
    let options = Options::new("my-dapp")
        .with_external_extension(remote("https://github.com/owner/ext", Some("feature")));

    let (_out, target) =
        compose_with(&base_fixture(), &vcs, &TemplateRegistry::new(), &options).unwrap();

    assert_eq!(
        *vcs.cloned.borrow(),
        vec![("https://github.com/owner/ext".to_string(), Some("feature".to_string()))]
    );
    let scratch = vcs.clone_destinations.borrow()[0].clone();
    assert!(scratch.starts_with(&target));
    assert!(!scratch.exists());
    assert!(fs::read_dir(&target).unwrap().all(|entry| !entry
        .unwrap()
        .file_name()
        .to_string_lossy()
        .starts_with("tmp-external-extension")));

    assert_eq!(read(&target, "packages/nextjs/hooks.ts"), "// remote hooks");
    assert_eq!(manifest(&target, "package.json")["scripts"]["lint"], json!("yarn lint"));
    assert!(!target.join("NOTES.md").exists());
}

#[test]
fn remote_repository_without_extension_dir_fails() {
    let vcs = FakeVcs::with_remote_tree(&[("NOTES.md", "no extension here")]);
    let options =
        Options::new("my-dapp").with_external_extension(remote("https://github.com/owner/ext", None));

    let result = compose_with(&base_fixture(), &vcs, &TemplateRegistry::new(), &options);
    assert!(matches!(result, Err(Error::TemplateDoesNotExistsError { .. })));
}

#[test]
fn dev_mode_local_extension_writes_sidecars() {
    let fixture = base_fixture().external(
        "my-ext",
        &[
            ("packages/nextjs/extra.tsx", "extra"),
            ("package.json", r#"{"name":"my-ext"}"#),
            (CONFIG_ARGS, "preConfigContent: local"),
        ],
    );
    let fixture = fixture.base(&[(CONFIG_TEMPLATE, LINES_TEMPLATE)]);
    let options = Options::new("my-dapp")
        .with_dev(true)
        .with_external_extension(ExternalExtension::Local("my-ext".into()));

    let (_out, target) = compose(&fixture, &options);

    assert_eq!(read(&target, CONFIG_OUTPUT), "local\n");
    let sidecar = read(&target, "packages/nextjs/scaffold.config.ts.dev");
    assert!(sidecar.starts_with("--- TEMPLATE FILE\n"));
    assert!(sidecar.contains("(base)"));
    assert!(sidecar.contains("scaffold.config.args.ts"));
    assert!(sidecar.contains("\t- preConfigContent:\t[local]"));

    let manifest_sidecar = read(&target, "package.json.dev");
    assert!(manifest_sidecar.starts_with("--- MERGED MANIFEST\n"));
    assert_eq!(manifest(&target, "package.json")["name"], json!("my-ext"));

    assert_eq!(read(&fixture.base_dir(), CONFIG_TEMPLATE), LINES_TEMPLATE);
    assert_eq!(
        read(&fixture.base_dir(), "package.json"),
        r#"{"name":"base","scripts":{"chain":"yarn chain"}}"#
    );
}

#[cfg(unix)]
#[test]
fn dev_mode_links_files_but_copies_lockfiles_and_manifests() {
    use std::os::unix::fs::MetadataExt;

    let fixture = base_fixture();
    let options = Options::new("my-dapp").with_dev(true);
    let (_out, target) = compose(&fixture, &options);

    let inode =
        |root: &std::path::Path, relative: &str| fs::metadata(root.join(relative)).unwrap().ino();
    let base = fixture.base_dir();
    assert_eq!(
        inode(&target, "packages/nextjs/page.tsx"),
        inode(&base, "packages/nextjs/page.tsx")
    );
    assert_ne!(inode(&target, "yarn.lock"), inode(&base, "yarn.lock"));
    assert_ne!(inode(&target, "package.json"), inode(&base, "package.json"));
    assert_eq!(read(&target, "yarn.lock"), "# lockfile");
}

#[cfg(unix)]
#[test]
fn dev_mode_merges_never_write_through_links() {
    let fixture = base_fixture().extension(
        "erc20",
        &[
            ("packages/stylus/src/lib.rs", "// erc20 contract"),
            ("readme.md", "erc20 readme"),
            (".gitmodules", "[submodule \"extra\"]"),
        ],
    );
    let options = Options::new("my-dapp")
        .with_dev(true)
        .with_extension(BuiltinExtension::Erc20);
    let (_out, target) = compose(&fixture, &options);

    assert_eq!(read(&target, "packages/stylus/src/lib.rs"), "// erc20 contract");
    assert_eq!(read(&fixture.base_dir(), "packages/stylus/src/lib.rs"), "// base contract");
    assert_eq!(read(&fixture.base_dir(), "readme.md"), "base readme");
    assert_eq!(read(&fixture.base_dir(), ".gitmodules"), "[submodule \"nitro-devnode\"]");
}

#[test]
fn local_extension_missing_from_disk_is_fatal() {
    let options = Options::new("my-dapp")
        .with_dev(true)
        .with_external_extension(ExternalExtension::Local("missing".into()));

    let result = compose_default(&base_fixture(), &options);
    assert!(matches!(result, Err(Error::TemplateDoesNotExistsError { .. })));
}
