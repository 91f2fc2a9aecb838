//! Report command implementation.
//!
//! Counts the list-valued cells of the output store. Reads the CSV the
//! pipeline wrote; nothing here calls the extraction service.

use crate::cli::ReportArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use jobsift_domain::LIST_SEPARATOR;
use std::collections::HashMap;
use std::path::Path;

/// List-valued fields the report knows how to count.
pub const REPORT_FIELDS: &[&str] = &[
    "languages",
    "frameworks",
    "tools",
    "cloud_platforms",
    "domain_knowledge",
];

/// Execute the report command.
pub fn execute_report(args: ReportArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if args.top == 0 {
        return Err(CliError::InvalidInput("--top must be greater than 0".to_string()));
    }
    let fields = selected_fields(&args.field)?;

    let output = &config.paths.output;
    if !output.is_file() {
        println!(
            "{}",
            formatter.warning(&format!("No output store at {}", output.display()))
        );
        return Ok(());
    }

    let (rows, counts) = tally(output, &fields)?;
    println!("{}", formatter.info(&format!("{} row(s) in {}", rows, output.display())));
    for (field, values) in counts {
        println!("{}", formatter.format_counts(&field, &top_n(values, args.top)));
    }
    Ok(())
}

fn selected_fields(requested: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(REPORT_FIELDS.iter().map(|f| f.to_string()).collect());
    }
    requested
        .iter()
        .map(|field| {
            let field = field.trim().to_lowercase();
            if REPORT_FIELDS.contains(&field.as_str()) {
                Ok(field)
            } else {
                Err(CliError::InvalidInput(format!(
                    "Unknown field '{}' (expected one of: {})",
                    field,
                    REPORT_FIELDS.join(", ")
                )))
            }
        })
        .collect()
}

/// Count lowercased values per field; fields missing from the header are skipped.
///
/// Returns the number of rows read and, per field present, its value counts.
pub fn tally(path: &Path, fields: &[String]) -> Result<(usize, Vec<(String, HashMap<String, usize>)>)> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut columns: Vec<(String, usize, HashMap<String, usize>)> = fields
        .iter()
        .filter_map(|field| {
            headers
                .iter()
                .position(|h| h == field)
                .map(|idx| (field.clone(), idx, HashMap::new()))
        })
        .collect();

    let mut rows = 0;
    for record in reader.records() {
        let record = record?;
        rows += 1;
        for (_, idx, counts) in columns.iter_mut() {
            let Some(cell) = record.get(*idx) else { continue };
            for value in cell.split(LIST_SEPARATOR).map(str::trim).filter(|v| !v.is_empty()) {
                *counts.entry(value.to_lowercase()).or_insert(0) += 1;
            }
        }
    }

    Ok((
        rows,
        columns
            .into_iter()
            .map(|(field, _, counts)| (field, counts))
            .collect(),
    ))
}

/// Most frequent values first; ties broken alphabetically.
pub fn top_n(counts: HashMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_tally_counts_list_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("market_data.csv");
        fs::write(
            &path,
            "id,title,languages,tools\n\
             a,Dev,rust; python,docker\n\
             b,Dev,rust,\n\
             c,Dev,go; rust,docker; git\n",
        )
        .unwrap();

        let fields = vec!["languages".to_string(), "tools".to_string(), "domain_knowledge".to_string()];
        let (rows, counts) = tally(&path, &fields).unwrap();

        assert_eq!(rows, 3);
        assert_eq!(counts.len(), 2, "absent columns are skipped");
        assert_eq!(counts[0].0, "languages");
        assert_eq!(counts[0].1["rust"], 3);
        assert_eq!(counts[1].1["docker"], 2);
    }

    #[test]
    fn test_tally_folds_case() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("market_data.csv");
        fs::write(
            &path,
            "id,languages\n\
             a,Rust; Python\n\
             b,rust\n\
             c,RUST; python\n",
        )
        .unwrap();

        let (_, counts) = tally(&path, &["languages".to_string()]).unwrap();

        assert_eq!(counts[0].1.len(), 2);
        assert_eq!(counts[0].1["rust"], 3);
        assert_eq!(counts[0].1["python"], 2);
    }

    #[test]
    fn test_top_n_orders_by_count_then_name() {
        let counts: HashMap<String, usize> = [("go", 2), ("rust", 5), ("c", 2), ("zig", 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let top = top_n(counts, 3);
        assert_eq!(
            top,
            vec![("rust".to_string(), 5), ("c".to_string(), 2), ("go".to_string(), 2)]
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(selected_fields(&["salary".to_string()]).is_err());
        assert_eq!(selected_fields(&[" Tools ".to_string()]).unwrap(), vec!["tools"]);
        assert_eq!(selected_fields(&[]).unwrap().len(), REPORT_FIELDS.len());
    }
}
