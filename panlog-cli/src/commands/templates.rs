//! `panlog templates` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use panlog_core::config::PanlogConfig;
use panlog_pan_parser::{PanInputConfig, PanMessageType, TemplateDefinition, TemplateSet};

use crate::cli::{CategoryArg, OutputFormat, TemplatesAction, TemplatesArgs};
use crate::error::CliError;
use crate::output::Render;

/// Execute the `templates` command.
pub fn execute(
    args: TemplatesArgs,
    config: &PanlogConfig,
    output: OutputFormat,
) -> Result<(), CliError> {
    let input_config = PanInputConfig::from_core(&config.paloalto)?;
    match args.action {
        TemplatesAction::Check => execute_check(&input_config, output),
        TemplatesAction::Show { category } => execute_show(&input_config, category, output),
    }
}

/// Build all three templates and report every line error.
///
/// # Errors
///
/// Returns `CliError::Template` if any template line is invalid.
fn execute_check(config: &PanInputConfig, output: OutputFormat) -> Result<(), CliError> {
    let report = check_report(config);
    output.render(&report, &mut std::io::stdout().lock())?;

    if !report.valid {
        return Err(CliError::Template(format!(
            "{} invalid template line(s)",
            report.errors.len()
        )));
    }

    info!("all templates are valid");
    Ok(())
}

/// Print the effective template of one category.
fn execute_show(
    config: &PanInputConfig,
    category: CategoryArg,
    output: OutputFormat,
) -> Result<(), CliError> {
    let report = show_report(config, message_type(category))?;
    output.render(&report, &mut std::io::stdout().lock())
}

/// Build the show report. Only errors in the requested category are fatal.
///
/// # Errors
///
/// Returns `CliError::Template` if the requested template has invalid lines.
pub fn show_report(
    config: &PanInputConfig,
    message_type: PanMessageType,
) -> Result<TemplateShowReport, CliError> {
    let templates = TemplateSet::build(
        &config.system_template,
        &config.threat_template,
        &config.traffic_template,
    );

    let errors: Vec<String> = templates
        .errors()
        .iter()
        .filter(|err| err.message_type == message_type)
        .map(ToString::to_string)
        .collect();
    if !errors.is_empty() {
        return Err(CliError::Template(format!(
            "[{message_type}] Palo Alto input template is invalid.\n{}",
            errors.join("\n")
        )));
    }

    Ok(TemplateShowReport::new(templates.get(message_type)))
}

/// Build the check report without failing on template errors.
pub fn check_report(config: &PanInputConfig) -> TemplateCheckReport {
    let templates = TemplateSet::build(
        &config.system_template,
        &config.threat_template,
        &config.traffic_template,
    );

    let categories = PanMessageType::ALL
        .into_iter()
        .map(|message_type| {
            let text = match message_type {
                PanMessageType::System => &config.system_template,
                PanMessageType::Threat => &config.threat_template,
                PanMessageType::Traffic => &config.traffic_template,
            };
            CategorySummary {
                category: message_type.as_str(),
                fields: templates.get(message_type).len(),
                builtin: text.trim().is_empty(),
            }
        })
        .collect();

    TemplateCheckReport {
        valid: !templates.has_errors(),
        categories,
        errors: templates.errors().iter().map(ToString::to_string).collect(),
        summary: templates.error_summary("\n"),
    }
}

fn message_type(category: CategoryArg) -> PanMessageType {
    match category {
        CategoryArg::System => PanMessageType::System,
        CategoryArg::Threat => PanMessageType::Threat,
        CategoryArg::Traffic => PanMessageType::Traffic,
    }
}

/// Template check result.
#[derive(Serialize)]
pub struct TemplateCheckReport {
    /// Whether every template built without errors
    pub valid: bool,
    /// Per-category field counts
    pub categories: Vec<CategorySummary>,
    /// Line errors
    pub errors: Vec<String>,
    /// Grouped diagnostic (text output only)
    #[serde(skip)]
    pub summary: String,
}

/// Field count of one built template.
#[derive(Serialize)]
pub struct CategorySummary {
    pub category: &'static str,
    pub fields: usize,
    /// True when the built-in default was used
    pub builtin: bool,
}

impl Render for TemplateCheckReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for summary in &self.categories {
            let origin = if summary.builtin { "built-in" } else { "custom" };
            writeln!(
                w,
                "{:<8} {:>3} fields ({origin})",
                summary.category, summary.fields
            )?;
        }

        if self.valid {
            writeln!(w, "Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "Result: {}", "INVALID".red().bold())?;
            for line in self.summary.lines() {
                writeln!(w, "  {}", line.red())?;
            }
        }

        Ok(())
    }
}

/// One template as position/field/type rows.
#[derive(Serialize)]
pub struct TemplateShowReport {
    pub category: &'static str,
    pub fields: Vec<TemplateRow>,
    #[serde(skip)]
    pub text: String,
}

#[derive(Serialize)]
pub struct TemplateRow {
    pub position: usize,
    pub field: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

impl TemplateShowReport {
    fn new(definition: &TemplateDefinition) -> Self {
        Self {
            category: definition.message_type().as_str(),
            fields: definition
                .iter()
                .map(|(position, descriptor)| TemplateRow {
                    position,
                    field: descriptor.name().to_owned(),
                    field_type: descriptor.field_type().to_string(),
                })
                .collect(),
            text: definition.to_template_text(),
        }
    }
}

impl Render for TemplateShowReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "position,field,type")?;
        write!(w, "{}", self.text)
    }
}
