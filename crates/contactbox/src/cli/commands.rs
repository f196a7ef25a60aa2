//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::error::Result;
use crate::form::Form;
use crate::listing::SortMode;
use crate::record::{EMAIL, INTERES, MENSAJE, NOMBRE};

/// Submit command arguments: one contact form.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Name
    #[arg(short, long)]
    pub nombre: Option<String>,

    /// Email address (not validated)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Interest category
    #[arg(short, long)]
    pub interes: Option<String>,

    /// Free-text message
    #[arg(short, long)]
    pub mensaje: Option<String>,

    /// Any other field, as name=value (repeatable)
    #[arg(short, long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,
}

impl SubmitCommand {
    /// Fill a form from the arguments.
    ///
    /// `--field` pairs are applied first, so a named flag wins over a
    /// `--field` of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if a `--field` argument isn't `name=value`.
    pub fn to_form(&self) -> Result<Form> {
        let mut form = Form::new();
        for pair in &self.fields {
            form.set_pair(pair)?;
        }
        let named = [
            (NOMBRE, &self.nombre),
            (EMAIL, &self.email),
            (INTERES, &self.interes),
            (MENSAJE, &self.mensaje),
        ];
        for (name, value) in named {
            if let Some(value) = value {
                form.set(name, value.clone());
            }
        }
        Ok(form)
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show records with exactly this interest
    #[arg(short, long)]
    pub interes: Option<String>,

    /// Sort order (default: submission order)
    #[arg(short, long, value_enum)]
    pub sort: Option<SortArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Interests command arguments.
#[derive(Debug, Args)]
pub struct InterestsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Sort argument for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// By name
    Name,
    /// By interest
    Interes,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => Self::Name,
            SortArg::Interes => Self::Interes,
        }
    }
}

/// Output format for the list command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// HTML list fragment
    Html,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(fields: Vec<&str>) -> SubmitCommand {
        SubmitCommand {
            nombre: None,
            email: None,
            interes: None,
            mensaje: None,
            fields: fields.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_sort_arg_conversion() {
        assert_eq!(SortMode::from(SortArg::Name), SortMode::Name);
        assert_eq!(SortMode::from(SortArg::Interes), SortMode::Interes);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_to_form_named_flags() {
        let mut cmd = submit(vec![]);
        cmd.nombre = Some("Ana".to_string());
        cmd.interes = Some("retiros".to_string());

        let record = cmd.to_form().unwrap().to_record();
        assert_eq!(record.nombre(), Some("Ana"));
        assert_eq!(record.interes(), Some("retiros"));
        assert!(record.email().is_none());
        assert!(record.mensaje().is_none());
    }

    #[test]
    fn test_to_form_extra_fields() {
        let cmd = submit(vec!["telefono=555-0100", "parroquia=San José"]);
        let record = cmd.to_form().unwrap().to_record();
        assert_eq!(record.get("telefono"), Some("555-0100"));
        assert_eq!(record.get("parroquia"), Some("San José"));
    }

    #[test]
    fn test_to_form_named_flag_wins() {
        let mut cmd = submit(vec!["nombre=from-field"]);
        cmd.nombre = Some("from-flag".to_string());
        let record = cmd.to_form().unwrap().to_record();
        assert_eq!(record.nombre(), Some("from-flag"));
    }

    #[test]
    fn test_to_form_bad_field() {
        let cmd = submit(vec!["no-equals-sign"]);
        assert!(cmd.to_form().is_err());
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        assert!(format!("{cmd:?}").contains("Show"));
    }
}
