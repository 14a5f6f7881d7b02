//! Apply command - fill the form and run one submission at a time

use crate::cli::style::Stylize;
use crate::cli::surface::TerminalSurface;
use anstream::{eprintln, println};
use dialoguer::{Confirm, Input, Select};
use loanflow::backend::{create_backend, ApplicationBackend};
use loanflow::config::Settings;
use loanflow::error::{Error, Result};
use loanflow::form::{check_value, AttachmentSlot, Field};
use loanflow::pipeline::{NoopSurface, Surface};
use loanflow::submit::LoanDesk;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Inputs gathered from the command line
#[derive(Debug, Default)]
pub struct ApplyArgs {
    /// Field values given as flags
    pub values: Vec<(Field, String)>,
    /// Identity document to upload
    pub identity_document: Option<PathBuf>,
    /// Income proof to upload
    pub income_proof: Option<PathBuf>,
    /// Prompt for missing fields and offer another round
    pub interactive: bool,
    /// Print the outcome as JSON instead of drawing the pipeline
    pub json: bool,
}

/// Run the apply command
pub async fn run_apply(settings: &Settings, args: ApplyArgs) -> Result<()> {
    let backend: Arc<dyn ApplicationBackend> = Arc::from(create_backend(settings)?);
    let surface: Arc<dyn Surface> = if args.json {
        Arc::new(NoopSurface)
    } else {
        Arc::new(TerminalSurface::new())
    };

    let mut desk = LoanDesk::builder()
        .backend(backend)
        .surface(surface)
        .pacing(settings.pacing)
        .build()?;

    let mut values = args.values;
    let mut attachments = vec![
        (AttachmentSlot::IdentityDocument, args.identity_document),
        (AttachmentSlot::IncomeProof, args.income_proof),
    ];

    loop {
        fill_form(&mut desk, &values, args.interactive)?;
        for (slot, path) in attachments.drain(..) {
            if let Some(path) = path {
                desk.attach(slot, path);
            }
        }

        let outcome = desk.submit().await?;
        debug!("submission finished: {}", outcome.kind);

        if args.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }

        if !args.interactive || !confirm_another()? {
            break;
        }

        desk.reset().await;
        values.clear();
    }

    Ok(())
}

/// Apply flag values, then prompt for whatever still blocks the gate
fn fill_form(desk: &mut LoanDesk, values: &[(Field, String)], interactive: bool) -> Result<()> {
    for (field, value) in values {
        let validity = desk.set_field(*field, value.as_str());
        if validity.is_marked(*field) {
            eprintln!(
                "{} {}: {}",
                "warning:".warn(),
                field.label(),
                check_value(*field, value).map(|p| p.to_string()).unwrap_or_default()
            );
        }
    }

    if !interactive {
        return Ok(());
    }

    for field in Field::ALL {
        if check_value(field, desk.form().get(field)).is_some() {
            let value = prompt(field)?;
            desk.set_field(field, value);
        }
    }

    Ok(())
}

fn prompt(field: Field) -> Result<String> {
    if let Some(choices) = field.choices() {
        let labels: Vec<&str> = choices.iter().map(|(_, label)| *label).collect();
        let picked = Select::new()
            .with_prompt(field.label())
            .items(&labels[..])
            .default(labels.len() - 1)
            .interact()
            .map_err(prompt_error)?;
        return Ok(choices[picked].0.to_string());
    }

    Input::<String>::new()
        .with_prompt(field.label())
        .validate_with(move |input: &String| -> std::result::Result<(), String> {
            check_value(field, input).map_or(Ok(()), |problem| Err(problem.to_string()))
        })
        .interact_text()
        .map(|value| value.trim().to_string())
        .map_err(prompt_error)
}

fn confirm_another() -> Result<bool> {
    Confirm::new()
        .with_prompt("Submit another application?")
        .default(false)
        .interact()
        .map_err(prompt_error)
}

fn prompt_error(err: dialoguer::Error) -> Error {
    Error::Io(std::io::Error::other(err))
}
