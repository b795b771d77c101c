use clap::Parser;
use kataform::prelude::*;
use serde_json::Value;
use std::fs;

/// Schema-driven job workflow checker CLI
///
/// Loads a workflow definition JSON (editing shape), normalizes every step's
/// extension, and optionally validates a value file against a `json_schema`
/// option's schema document.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow JSON file (editing shape)
    workflow_path: String,

    /// Optional path to a wire value JSON file to validate against the
    /// workflow's json_schema option
    #[arg(short, long)]
    value_path: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let workflow_json = fs::read_to_string(&cli.workflow_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read workflow file '{}': {}",
            &cli.workflow_path, e
        ))
    });
    let edit: WorkflowEdit = serde_json::from_str(&workflow_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse workflow JSON: {}", e)));

    println!("Checking workflow '{}'...", edit.name);
    println!(
        "  {} option(s), {} step(s), {} notification(s)",
        edit.options.len(),
        edit.steps.len(),
        edit.notifications.len()
    );

    // Normalizing every step is the submit-path check: the first bad step
    // aborts with its 1-based order in the message.
    let workflow = edit
        .into_wire()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    for step in &workflow.steps {
        println!(
            "  step {} ({}): extension ok, {} field(s)",
            step.order,
            step.step_type,
            step.extension.0.len()
        );
    }

    let Some(value_path) = cli.value_path else {
        println!("Workflow OK.");
        return;
    };

    let schema_doc = workflow
        .options
        .iter()
        .find(|o| o.option_type == OptionType::JsonSchema)
        .and_then(|o| o.json_schema.clone())
        .unwrap_or_else(|| {
            exit_with_error("Workflow has no json_schema option to validate against")
        });

    let value_json = fs::read_to_string(&value_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read value file '{}': {}", value_path, e))
    });
    let wire: Value = serde_json::from_str(&value_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse value JSON: {}", e)));

    let mut engine = FormEngine::new(&schema_doc)
        .unwrap_or_else(|e| exit_with_error(&format!("Bad schema document: {}", e)));
    engine.set_value(&wire);

    match engine.validate() {
        Ok(coerced) => {
            println!("Value OK. Coerced wire value:");
            let pretty =
                serde_json::to_string_pretty(&coerced).unwrap_or_else(|_| coerced.to_string());
            println!("{}", pretty);
        }
        Err(errors) => {
            eprintln!("Value failed validation with {} error(s):", errors.len());
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(1);
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
