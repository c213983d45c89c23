//! CLI Argument Parsing
//!
//! `texview <MASTER> [INCLUDED]...`: the first file is the master document,
//! every further file is compiled through it.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ColorMode, Config};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorMode {
    fn from(value: ColorWhen) -> Self {
        match value {
            ColorWhen::Auto => ColorMode::Auto,
            ColorWhen::Always => ColorMode::Always,
            ColorWhen::Never => ColorMode::Never,
        }
    }
}

/// texview - live preview for LaTeX documents
#[derive(Parser, Debug)]
#[command(name = "texview")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Recompiles MASTER whenever any watched file changes. Press Ctrl+C to stop.")]
pub struct Cli {
    /// Master document to compile and preview
    #[arg(value_name = "MASTER")]
    pub master: PathBuf,

    /// Files included by the master document
    #[arg(value_name = "INCLUDED")]
    pub included: Vec<PathBuf>,

    /// Compiler program (default: pdflatex)
    #[arg(long, value_name = "PROGRAM")]
    pub compiler: Option<String>,

    /// Compiler argument placed before the file name (repeatable, replaces configured args)
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub compiler_args: Vec<String>,

    /// Extension of the rendered document (default: pdf)
    #[arg(long, value_name = "EXT")]
    pub output_extension: Option<String>,

    /// Use this config file instead of the project/user lookup
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Compile once before showing the rendering
    #[arg(long)]
    pub initial_compile: bool,

    /// Emit NDJSON events instead of the live terminal view
    #[arg(long)]
    pub json: bool,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Layer command line flags over a loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(program) = &self.compiler {
            config.compiler.program = program.clone();
        }
        if !self.compiler_args.is_empty() {
            config.compiler.args = self.compiler_args.clone();
        }
        if let Some(ext) = &self.output_extension {
            config.compiler.output_extension = ext.trim_start_matches('.').to_string();
        }
        if self.initial_compile {
            config.watch.initial_compile = true;
        }
        if let Some(color) = self.color {
            config.output.color = color.into();
        }
    }
}
