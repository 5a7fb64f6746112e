//! Built-in blueprints and user blueprint discovery.
//!
//! Two blueprints are compiled into the binary:
//!
//! - **`default`**: a small TypeScript web app with a component whose
//!   template, stylesheet and spec are separate, optional files.
//! - **`library`**: a TypeScript library with one module and its spec.
//!
//! User blueprints are loaded from disk by [`user_blueprints`]. Candidate
//! directories are checked in this order, stopping at the first that exists
//! and holds at least one valid blueprint:
//!
//! 1. **`$TRELLIS_BLUEPRINTS_DIR`**
//! 2. the configured `blueprints.local_path`
//!
//! ```env
//! TRELLIS_BLUEPRINTS_DIR=./blueprints
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use trellis_core::{
    domain::{Blueprint, BlueprintMetadata, DomainError, FileCategory},
    error::TrellisResult,
};

use crate::blueprint_loader::FilesystemBlueprintLoader;

/// Environment variable naming a directory of user blueprints.
pub const BLUEPRINTS_DIR_ENV: &str = "TRELLIS_BLUEPRINTS_DIR";

/// Name of the blueprint used when none is requested.
pub const DEFAULT_BLUEPRINT: &str = "default";

/// Every compiled-in blueprint.
pub fn all_blueprints() -> TrellisResult<Vec<Blueprint>> {
    Ok(vec![default_web_app()?, library()?])
}

/// Load user blueprints from the first usable candidate directory.
///
/// Returns an empty `Vec` when no candidate exists.
///
/// # Errors
///
/// Propagates failures reading an existing candidate directory. Individual
/// invalid blueprints are skipped by the loader.
#[instrument]
pub fn user_blueprints(configured: Option<&Path>) -> Result<Vec<Blueprint>, DomainError> {
    let env_dir = std::env::var(BLUEPRINTS_DIR_ENV).ok();

    for candidate in candidate_paths(env_dir.as_deref(), configured) {
        if !candidate.is_dir() {
            debug!(path = %candidate.display(), "path does not exist, skipping");
            continue;
        }

        let blueprints = FilesystemBlueprintLoader::new(&candidate).load_all()?;
        if blueprints.is_empty() {
            debug!(
                path = %candidate.display(),
                "directory exists but contains no blueprints, trying next"
            );
            continue;
        }

        info!(
            path  = %candidate.display(),
            count = blueprints.len(),
            "user blueprints loaded"
        );
        return Ok(blueprints);
    }

    Ok(vec![])
}

/// Ordered candidate directories for user blueprints.
fn candidate_paths(env_dir: Option<&str>, configured: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);

    if let Some(dir) = env_dir.filter(|d| !d.trim().is_empty()) {
        paths.push(PathBuf::from(dir));
    }

    if let Some(dir) = configured {
        paths.push(dir.to_path_buf());
    }

    paths
}

// ── default ─────────────────────────────────────────────────────────────────

const EDITORCONFIG: &str = "\
# Editor configuration, see https://editorconfig.org
root = true

[*]
charset = utf-8
indent_style = space
indent_size = 2
insert_final_newline = true
trim_trailing_whitespace = true

[*.md]
max_line_length = off
trim_trailing_whitespace = false
";

const GITIGNORE: &str = "\
/dist
/node_modules
/coverage
npm-debug.log
.DS_Store
";

const MARKER: &str = r#"{
  "project": "{{PACKAGE_NAME}}",
  "generator": "trellis"
}
"#;

const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "outDir": "./dist",
    "target": "es2022",
    "module": "es2022",
    "moduleResolution": "node",
    "strict": true,
    "experimentalDecorators": true,
    "sourceMap": true
  }
}
"#;

const README: &str = "\
# {{PROJECT_NAME}}

Generated by trellis.

## Development

Run `npm start` for a dev server and `npm test` to execute the unit tests.
";

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{PROJECT_NAME_PASCAL}}</title>
  <link rel="stylesheet" href="styles.css">
</head>
<body>
  <app-root></app-root>
  <script type="module" src="main.ts"></script>
</body>
</html>
"#;

const MAIN_TS: &str = "\
import { AppComponent } from './app/app.component';
import { config } from './app/__name__.config';

AppComponent.bootstrap(document.querySelector('app-root'), config);
";

const STYLES_CSS: &str = "/* Global styles for {{PROJECT_NAME}} */\n";

const APP_CONFIG_TS: &str = "\
export const config = {
  name: '{{PACKAGE_NAME}}',
  year: {{YEAR}},
};
";

const APP_COMPONENT_TS: &str = "\
export class AppComponent {
  title = '{{PACKAGE_NAME}}';

  static bootstrap(host: Element | null, config: { name: string }): AppComponent {
    const app = new AppComponent();
    if (host) {
      host.setAttribute('data-app', config.name);
    }
    return app;
  }
}
";

const APP_COMPONENT_HTML: &str = "<h1>Welcome to {{title}}!</h1>\n";

const APP_COMPONENT_CSS: &str = "h1 {\n  font-family: sans-serif;\n}\n";

const APP_COMPONENT_SPEC: &str = "\
import { AppComponent } from './app.component';

describe('AppComponent', () => {
  it(`should have as title '{{PACKAGE_NAME}}'`, () => {
    expect(new AppComponent().title).toEqual('{{PACKAGE_NAME}}');
  });
});
";

/// The `default` blueprint.
pub fn default_web_app() -> TrellisResult<Blueprint> {
    Ok(Blueprint::builder()
        .metadata(
            BlueprintMetadata::new(DEFAULT_BLUEPRINT)
                .description("TypeScript web app with a root component")
                .version("1.0.0")
                .install_command(["npm", "install"]),
        )
        .core(".editorconfig", EDITORCONFIG)
        .core(".trellis.json", MARKER)
        .core("README.md", README)
        .core("gitignore", GITIGNORE)
        .core("tsconfig.json", TSCONFIG)
        .core("src/index.html", INDEX_HTML)
        .core("src/main.ts", MAIN_TS)
        .core("src/styles.css", STYLES_CSS)
        .core("src/app/__name__.config.ts", APP_CONFIG_TS)
        .core("src/app/app.component.ts", APP_COMPONENT_TS)
        .file(
            "src/app/app.component.html",
            FileCategory::TemplateBody,
            APP_COMPONENT_HTML,
        )
        .file(
            "src/app/app.component.css",
            FileCategory::StyleBody,
            APP_COMPONENT_CSS,
        )
        .file(
            "src/app/app.component.spec.ts",
            FileCategory::Spec,
            APP_COMPONENT_SPEC,
        )
        .rename("gitignore", ".gitignore")
        .build()?)
}

// ── library ─────────────────────────────────────────────────────────────────

const LIB_INDEX_TS: &str = "export * from './__name__';\n";

const LIB_MODULE_TS: &str = "\
export function greet(who: string): string {
  return `Hello from {{PACKAGE_NAME}}, ${who}!`;
}
";

const LIB_SPEC_TS: &str = "\
import { greet } from './__name__';

describe('greet', () => {
  it('mentions the package', () => {
    expect(greet('you')).toContain('{{PACKAGE_NAME}}');
  });
});
";

/// The `library` blueprint.
pub fn library() -> TrellisResult<Blueprint> {
    Ok(Blueprint::builder()
        .metadata(
            BlueprintMetadata::new("library")
                .description("TypeScript library with a single module")
                .version("1.0.0")
                .install_command(["npm", "install"]),
        )
        .core(".editorconfig", EDITORCONFIG)
        .core(".trellis.json", MARKER)
        .core("README.md", README)
        .core("gitignore", GITIGNORE)
        .core("tsconfig.json", TSCONFIG)
        .core("src/index.ts", LIB_INDEX_TS)
        .core("src/__name__.ts", LIB_MODULE_TS)
        .file("src/__name__.spec.ts", FileCategory::Spec, LIB_SPEC_TS)
        .rename("gitignore", ".gitignore")
        .build()?)
}
