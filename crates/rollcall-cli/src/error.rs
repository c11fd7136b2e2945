use anyhow::Error;
use rollcall_config::ConfigError;
use rollcall_core::rules::{IntakeError, LookupFailure, ValidationError};
use rollcall_core::CoreError;
use rollcall_lookup::LookupError;
use rollcall_store::error::{StoreError, StoreErrorKind};
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
                CliError::NotFound(_) => EXIT_NOT_FOUND,
            });
        }
        if let Some(intake_err) = cause.downcast_ref::<IntakeError>() {
            return ExitCode::from(match intake_err {
                IntakeError::Validation(_) => EXIT_INVALID_INPUT,
                IntakeError::Lookup(failure) => lookup_failure_exit_code(failure),
            });
        }
        if let Some(_validation_err) = cause.downcast_ref::<ValidationError>() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
        if let Some(failure) = cause.downcast_ref::<LookupFailure>() {
            return ExitCode::from(lookup_failure_exit_code(failure));
        }
        if let Some(lookup_err) = cause.downcast_ref::<LookupError>() {
            return ExitCode::from(lookup_exit_code(lookup_err));
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return ExitCode::from(store_exit_code(store_err));
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if let Some(_core_err) = cause.downcast_ref::<CoreError>() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn lookup_failure_exit_code(failure: &LookupFailure) -> u8 {
    match failure {
        LookupFailure::NotFound(_) => EXIT_INVALID_INPUT,
        LookupFailure::Transport(_) => EXIT_FAILURE,
    }
}

fn lookup_exit_code(err: &LookupError) -> u8 {
    match err {
        LookupError::NotFound(_) | LookupError::Url(_) => EXIT_INVALID_INPUT,
        LookupError::Http(_) | LookupError::Parse(_) => EXIT_FAILURE,
    }
}

fn store_exit_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::NotFound => EXIT_NOT_FOUND,
        StoreErrorKind::InvalidDataPath | StoreErrorKind::DuplicateEmail | StoreErrorKind::Core => {
            EXIT_INVALID_INPUT
        }
        StoreErrorKind::MissingHomeDir
        | StoreErrorKind::Migration
        | StoreErrorKind::Json
        | StoreErrorKind::Sql
        | StoreErrorKind::Io => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidSessionTimeout(_)
        | ConfigError::InvalidLookupTimeout(_)
        | ConfigError::InvalidLookupUrl(_)
        | ConfigError::InvalidUserAgent
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}
