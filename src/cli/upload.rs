use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::api::{HttpUploadApi, UploadApi};
use crate::categories::categories_for;
use crate::error::Result;
use crate::fmt::{confidence_badge, money, size_mb};
use crate::models::TxnType;
use crate::session::StoredTokenProvider;
use crate::settings::load_settings;
use crate::workflow::{UploadState, UploadWorkflow};

pub fn run(file: &str, yes: bool, api_url: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let base_url = api_url.unwrap_or(&settings.api_url);
    let api = HttpUploadApi::new(base_url, Box::new(StoredTokenProvider))?;
    let workflow = UploadWorkflow::new(api).on_complete(|count| {
        println!("{}", format!("{count} transactions imported.").green());
    });
    drive(workflow, Path::new(file), yes)
}

fn drive<A: UploadApi>(mut wf: UploadWorkflow<A>, path: &Path, yes: bool) -> Result<()> {
    wf.select_file(path)?;
    if let Some(f) = wf.file() {
        println!("File: {} ({})", f.name, size_mb(f.size));
        if f.oversize() {
            println!(
                "{}",
                "Note: exceeds the 10 MB guidance; the server may reject it.".yellow()
            );
        }
    }

    let summary = wf.request_preview()?;
    println!(
        "{} transactions ready for review. {} need manual review.",
        summary.total,
        summary.needs_review.to_string().yellow()
    );
    print_batch(&wf);

    if yes {
        if summary.needs_review == 0 {
            wf.confirm_import()?;
            return Ok(());
        }
        println!("{}", "--yes ignored: some rows need manual review.".yellow());
    }

    loop {
        match wf.state() {
            UploadState::Done => return Ok(()),
            UploadState::Idle => {
                println!("Upload cancelled.");
                return Ok(());
            }
            UploadState::FileSelected => {
                println!("Preview discarded. Re-run `satchel upload` to try again.");
                return Ok(());
            }
            _ => {}
        }

        let line = prompt("[i]mport  [e]dit <id>  [l]ist  [b]ack  [q]uit > ")?;
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("i") | Some("import"), _) => {
                let stale: Vec<String> = wf
                    .batch()
                    .rows_with_invalid_category()
                    .iter()
                    .map(|r| r.id.clone())
                    .collect();
                if !stale.is_empty() {
                    println!(
                        "{} Re-select a category for: {}",
                        "Some rows have a category that no longer matches their type.".red(),
                        stale.join(", ")
                    );
                    continue;
                }
                // Batch is preserved on failure; the user can retry or edit.
                if let Err(e) = wf.confirm_import() {
                    println!("{}", e.to_string().red());
                }
            }
            (Some("e") | Some("edit"), Some(id)) => {
                if wf.batch().get(id).is_none() {
                    println!("No row with id {id}.");
                    continue;
                }
                if let Err(e) = edit_row(&mut wf, id) {
                    println!("{}", e.to_string().red());
                }
            }
            (Some("e") | Some("edit"), None) => println!("Usage: e <row id>"),
            (Some("l") | Some("list"), _) => print_batch(&wf),
            (Some("b") | Some("back"), _) => wf.go_back()?,
            (Some("q") | Some("quit"), _) => wf.cancel()?,
            (None, _) => {}
            _ => println!("Unknown command."),
        }
    }
}

fn edit_row<A: UploadApi>(wf: &mut UploadWorkflow<A>, id: &str) -> Result<()> {
    let (current_type, current_category) = {
        let row = match wf.batch().get(id) {
            Some(r) => r,
            None => return Ok(()),
        };
        println!(
            "{}  {}  {}  [{} / {}]",
            row.date,
            row.description,
            money(row.amount),
            row.suggested_type.label(),
            row.suggested_category
        );
        (row.suggested_type, row.suggested_category.clone())
    };

    let answer = prompt(&format!(
        "Type (income/expense, blank keeps {}): ",
        current_type.label()
    ))?;
    let new_type = if answer.is_empty() {
        current_type
    } else {
        match TxnType::parse(&answer) {
            Some(t) => t,
            None => {
                println!("Expected income or expense.");
                return Ok(());
            }
        }
    };
    if new_type != current_type {
        wf.update_row_type(id, new_type)?;
    }

    let choices = categories_for(new_type);
    for (i, cat) in choices.iter().enumerate() {
        println!("  {:>2}. {cat}", i + 1);
    }
    let answer = prompt(&format!("Category (number, blank keeps {current_category}): "))?;
    if answer.is_empty() {
        return Ok(());
    }
    match answer.parse::<usize>() {
        Ok(n) if (1..=choices.len()).contains(&n) => {
            wf.update_row_category(id, choices[n - 1])?;
            println!("Updated {id}.");
        }
        _ => println!("Expected a number between 1 and {}.", choices.len()),
    }
    Ok(())
}

fn print_batch<A: UploadApi>(wf: &UploadWorkflow<A>) {
    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Date", "Description", "Amount", "Type", "Category", "Confidence", "Review",
    ]);
    for row in wf.batch().rows() {
        table.add_row(vec![
            Cell::new(&row.id),
            Cell::new(&row.date),
            Cell::new(&row.description),
            Cell::new(money(row.amount)),
            Cell::new(row.suggested_type.label()),
            Cell::new(&row.suggested_category),
            Cell::new(confidence_badge(row.confidence)),
            Cell::new(if row.needs_review { "!" } else { "" }),
        ]);
    }
    println!("{table}");
}

fn prompt(msg: &str) -> Result<String> {
    print!("{msg}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
