//! Implementation of the `trellis list` command.

use trellis_core::application::{BlueprintInfo, BlueprintResolver};

use crate::{
    cli::{ListArgs, ListFormat},
    commands::blueprint_store,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let resolver = BlueprintResolver::new(blueprint_store(config)?);
    let blueprints = resolver.list()?;

    // `--output-format json` implies the JSON listing.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Json => output.json(&blueprints)?,
        ListFormat::List => {
            for bp in &blueprints {
                output.print(&bp.name)?;
            }
        }
        ListFormat::Table => {
            output.header("Available Blueprints:")?;
            for line in table_rows(&blueprints) {
                output.print(&line)?;
            }
        }
    }

    Ok(())
}

fn table_rows(blueprints: &[BlueprintInfo]) -> Vec<String> {
    let width = blueprints
        .iter()
        .map(|b| b.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut rows = vec![format!(
        "  {:<width$}  {:<8}  {:>5}  {:<24}  DESCRIPTION",
        "NAME", "VERSION", "FILES", "OPTIONAL"
    )];

    for bp in blueprints {
        let optional = if bp.optional_categories.is_empty() {
            "-".to_string()
        } else {
            bp.optional_categories
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(",")
        };
        rows.push(format!(
            "  {:<width$}  {:<8}  {:>5}  {:<24}  {}",
            bp.name, bp.version, bp.entries, optional, bp.description
        ));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::domain::FileCategory;

    fn info(name: &str, optional: Vec<FileCategory>) -> BlueprintInfo {
        BlueprintInfo {
            name: name.into(),
            description: "desc".into(),
            version: "1.0.0".into(),
            entries: 4,
            optional_categories: optional,
        }
    }

    #[test]
    fn table_has_header_and_one_row_per_blueprint() {
        let rows = table_rows(&[
            info("default", vec![FileCategory::Spec, FileCategory::StyleBody]),
            info("library", vec![]),
        ]);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("NAME") && rows[0].contains("DESCRIPTION"));
        assert!(rows[1].contains("spec,style-body"));
        assert!(rows[2].contains("library") && rows[2].contains(" - "));
    }

    #[test]
    fn columns_align_to_longest_name() {
        let rows = table_rows(&[info("a", vec![]), info("much-longer-name", vec![])]);
        let version_col = |row: &str| row.find("1.0.0");
        assert_eq!(version_col(&rows[1]), version_col(&rows[2]));
    }
}
