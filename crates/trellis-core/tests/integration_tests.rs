//! Integration tests for trellis-core's public API.

use std::path::{Path, PathBuf};

use trellis_core::domain::{
    DirectoryResolver, FileCategory, GenerationOptions, NameValidator, RenderContext, dasherize,
};
use trellis_core::prelude::*;

#[test]
fn name_rules_table() {
    for ok in ["abc", "abc-def", "abc-123"] {
        assert!(NameValidator::validate(ok).is_ok(), "{ok} rejected");
    }
    for bad in ["!", "abc-.", "abc-", "abc-def-", ""] {
        let err: TrellisError = NameValidator::validate(bad).unwrap_err().into();
        assert_eq!(err.code(), "invalid-name", "{bad} accepted");
    }
}

#[test]
fn dasherize_round_trips() {
    assert_eq!(dasherize("FooApp"), "foo-app");
    assert_eq!(dasherize(&dasherize("FooApp")), dasherize("FooApp"));
}

#[test]
fn directory_override_keeps_package_name() {
    let identity = NameValidator::validate("foo").unwrap();
    let options = GenerationOptions::new().with_directory("bar");
    let resolved = DirectoryResolver::resolve(&identity, &options, Path::new("/work"));

    assert_eq!(resolved.target_directory, PathBuf::from("/work/bar"));
    assert_eq!(resolved.package_identity, "foo");
}

#[test]
fn blueprint_path_tokens_render_with_package_identity() {
    let identity = NameValidator::validate("FooApp").unwrap();
    let ctx = RenderContext::new(&identity);

    let blueprint = Blueprint::builder()
        .metadata(BlueprintMetadata::new("tiny"))
        .core("src/__name__.module.ts", "")
        .file("src/__name__.spec.ts", FileCategory::Spec, "")
        .build()
        .unwrap();

    let rendered: Vec<String> = blueprint
        .entries
        .iter()
        .map(|e| ctx.render(blueprint.destination_for(e)))
        .collect();

    assert_eq!(rendered, ["src/foo-app.module.ts", "src/foo-app.spec.ts"]);
}
