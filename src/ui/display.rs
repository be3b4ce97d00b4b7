//! Display helpers for resolved operators and deploy summaries

use console::Style;
use serde::Serialize;

use crate::domain::{OperatorMetadata, OperatorSet};
use crate::metadata::ResolvedCatalog;

const RULE: &str = "-------------------------------------------------------------------------------";

/// Print the operators of a release as a colored list
pub fn display_catalog(catalog: &ResolvedCatalog) {
    let green = Style::new().green();
    let bold_green = Style::new().green().bold();

    println!();
    println!(
        "{}",
        bold_green.apply_to(format!("Operators for CP4I version {}", catalog.version))
    );
    println!("{}", green.apply_to(RULE));
    for op in &catalog.operators {
        println!("{}", format_operator_line(op));
    }
    println!("{}", green.apply_to(RULE));

    if catalog.dropped > 0 {
        println!(
            "{}",
            Style::new().yellow().apply_to(format!(
                "{} catalog entr{} skipped (missing name, package or version)",
                catalog.dropped,
                if catalog.dropped == 1 { "y" } else { "ies" }
            ))
        );
    }
}

fn format_operator_line(op: &OperatorMetadata) -> String {
    let value = Style::new().green();
    format!(
        "{} ({}): CASE version: {}, channel: {}",
        value.apply_to(&op.literal_name),
        op.friendly_name,
        value.apply_to(&op.package_version),
        value.apply_to(op.channel.as_deref().unwrap_or("<none>")),
    )
}

#[derive(Serialize)]
struct CatalogJson<'a> {
    version: &'a str,
    dropped: usize,
    operators: &'a [OperatorMetadata],
}

/// Render the operators of a release as pretty JSON
pub fn catalog_json(catalog: &ResolvedCatalog) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CatalogJson {
        version: &catalog.version,
        dropped: catalog.dropped,
        operators: &catalog.operators,
    })
}

/// Print the selection summary shown before anything is downloaded
pub fn display_deploy_summary(operators: &OperatorSet, catalog_ns: &str, target_ns: &str) {
    println!("\nWill deploy following operators: ");
    for name in operators.names() {
        println!("   {}", Style::new().green().apply_to(name));
    }

    let catalog_style = if catalog_ns == crate::config::MARKETPLACE_NAMESPACE {
        Style::new().green()
    } else {
        Style::new().red()
    };
    println!(
        "\nCatalog sources will be applied in: {}",
        catalog_style.apply_to(catalog_ns)
    );
    println!(
        "Operators will be deployed in: {}\n",
        Style::new().green().apply_to(target_ns)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::operator::metadata;

    #[test]
    fn test_catalog_json_shape() {
        let catalog = ResolvedCatalog {
            version: "16.1.0".to_string(),
            operators: vec![metadata("ibm-mq", "ibm-mq")],
            dropped: 2,
        };

        let json = catalog_json(&catalog).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], "16.1.0");
        assert_eq!(value["dropped"], 2);
        assert_eq!(value["operators"][0]["literal_name"], "ibm-mq");
        assert_eq!(value["operators"][0]["channel"], "v1.0");
    }

    #[test]
    fn test_operator_line_mentions_missing_channel() {
        let mut op = metadata("ibm-mq", "ibm-mq");
        op.channel = None;
        let line = console::strip_ansi_codes(&format_operator_line(&op)).to_string();
        assert!(line.contains("ibm-mq"));
        assert!(line.contains("<none>"));
    }
}
