use std::path::PathBuf;

use clap::Subcommand;
use schemars::schema_for;
use schoolrun_routing::RouteResponse;

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    JsonSchema {
        /// File the route result schema is written to
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::JsonSchema { out } => {
            let schema = serde_json::to_string_pretty(&schema_for!(RouteResponse))?;

            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(out, schema)?;
        }
    }

    Ok(())
}
