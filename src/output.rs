use indexmap::IndexMap;

use crate::license::PackageLicenseMap;
use crate::policy::Comparison;

pub fn format_summary(map: &PackageLicenseMap, comparison: Option<&Comparison>, verbose: bool) -> String {
    let mut output = String::new();

    let total = map.len();
    let with_license = map.with_license();
    let flagged = comparison.map(|c| c.flagged().count()).unwrap_or(0);

    output.push_str(&format!("📦 License Summary ({} packages)\n", total));
    output.push_str(&format!(
        "✅ {} with licenses  ⚠️ {} unknown  🚫 {} new protected licenses\n\n",
        with_license,
        total - with_license,
        flagged
    ));

    output.push_str(&format_license_table(&license_counts(map)));

    if verbose {
        output.push_str("\n📦 All Packages:\n");
        output.push_str(&format_package_table(map));
    }

    if let Some(comparison) = comparison {
        if comparison.new_licenses.is_empty() {
            output.push_str("\n✅ No new licenses since the previous report\n");
        } else {
            output.push_str("\n⚠️  New licenses since the previous report:\n");
            for new in &comparison.new_licenses {
                let marker = if new.matched_rule.is_some() { "🚫" } else { "•" };
                output.push_str(&format!(
                    "  {} {} ({})\n",
                    marker,
                    new.license,
                    new.packages.join(", ")
                ));
            }
        }
    }

    output
}

/// Packages per license, most used first.
fn license_counts(map: &PackageLicenseMap) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for package in map.packages() {
        for license in package.report_licenses() {
            *counts.entry(license.to_string()).or_insert(0) += 1;
        }
    }
    counts.sort_by(|a_key, a_count, b_key, b_count| b_count.cmp(a_count).then(a_key.cmp(b_key)));
    counts
}

fn format_license_table(counts: &IndexMap<String, usize>) -> String {
    if counts.is_empty() {
        return "No packages found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("┌─────────────────────────┬──────────┐\n");
    output.push_str("│ License                 │ Packages │\n");
    output.push_str("├─────────────────────────┼──────────┤\n");
    for (license, count) in counts {
        output.push_str(&format!("│ {:<23} │ {:>8} │\n", truncate(license, 23), count));
    }
    output.push_str("└─────────────────────────┴──────────┘\n");
    output
}

fn format_package_table(map: &PackageLicenseMap) -> String {
    if map.is_empty() {
        return "No packages found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("┌─────────────────────────┬──────────┬─────────────────────────┬──────────────┐\n");
    output.push_str("│ Package                 │ Version  │ License                 │ Source       │\n");
    output.push_str("├─────────────────────────┼──────────┼─────────────────────────┼──────────────┤\n");
    for package in map.packages() {
        output.push_str(&format!(
            "│ {:<23} │ {:<8} │ {:<23} │ {:<12} │\n",
            truncate(&package.name, 23),
            truncate(package.version.as_deref().unwrap_or("unknown"), 8),
            truncate(&package.license, 23),
            truncate(&package.manifest_source, 12),
        ));
    }
    output.push_str("└─────────────────────────┴──────────┴─────────────────────────┴──────────────┘\n");
    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 1).collect();
        format!("{}…", kept)
    }
}
