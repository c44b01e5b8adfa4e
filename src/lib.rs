//! Mason is an interactive project-scaffolding tool.
//! It collects a project configuration through a sequence of prompts (or a
//! preset, or a JSON document on stdin) and materializes a new project
//! directory from a template tree, substituting `{{VARIABLE}}` placeholders.

/// Command-line interface module for the Mason application
pub mod cli;

/// Typed project configuration, discriminator enums, placeholder mapping
/// construction and input validators
pub mod config;

/// Common constants: template marker, ignore file, subtree names
pub mod constants;

/// Error types and handling for the Mason application
pub mod error;

/// File and directory ignore patterns
/// Processes .masonignore files to exclude specific paths
pub mod ignore;

/// Logger initialization
pub mod logger;

/// Core materialization engine
/// Renders the template tree into the destination project directory
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Confirmation recap and next-steps output
pub mod summary;

/// Placeholder substitution and template-file classification
pub mod template;

/// Stateless console formatting helpers
pub mod ui;

/// Interactive configuration collector
pub mod wizard;
