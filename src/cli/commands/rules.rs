//! List the effective rule catalog

use std::path::Path;

use devbar::config::DevbarConfig;
use devbar::output::{CategoryInfo, OutputMode, RuleInfo, RuleListOutput};

/// Print every category and rule in audit order
pub fn rules(root: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let config = DevbarConfig::load(root)?;
    let catalog = config.catalog(root)?;

    let categories = catalog
        .categories()
        .iter()
        .map(|category| CategoryInfo {
            code: category.code.clone(),
            name: category.name.clone(),
            rules: category
                .rules()
                .iter()
                .map(|rule| RuleInfo {
                    code: rule.code().to_string(),
                    selector: rule.selector().source().to_string(),
                    refined: rule.predicate().is_some(),
                })
                .collect(),
        })
        .collect();

    RuleListOutput { categories }.render(mode);
    Ok(())
}
