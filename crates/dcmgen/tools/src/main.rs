// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! DCM generator CLI
//!
//! Main entry point for `dcm-generate-models`.

use clap::{CommandFactory, Parser};
use dcmgen_tools::{CONFIG_ENV, GenerateArgs, GenerationPipeline, ToolConfig};
use std::process::ExitCode;
use tracing::{Level, error};

fn main() -> ExitCode {
    let args = GenerateArgs::parse();

    // stdout carries the generated script
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    if !args.is_complete() {
        return match GenerateArgs::command().print_long_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!("{}", err);
                ExitCode::FAILURE
            }
        };
    }

    let config = match ToolConfig::resolve_config(args.config.clone(), std::env::var(CONFIG_ENV).ok()) {
        Ok(config) => config,
        Err(err) => {
            error!("{:#}", err);
            return ExitCode::FAILURE;
        }
    };

    match GenerationPipeline::new(args, config).execute() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
