mod logo;
mod options;
mod payload;
mod render;
mod session;
mod style;
mod tool;
mod tools;
mod upload;

use std::io::{self, Write};

use clap::FromArgMatches;

use crate::tool::{Output, Tool};
use anyhow::{Context, anyhow};

// This way of building main is not ideal.
macro_rules! toolbox {
    ($cmd:ident, $(($tool:path, $name:literal, $($alias:literal),*)),+) => {
        {
            // Register the tools.
            $(
                $cmd = $cmd.subcommand(
                    <$tool>::cli()
                    .name($name)
                    $(.alias($alias))*
                );
            )*

            // Parse args.
            let matches = $cmd.get_matches();
            let (subcommand_name, subcommand_matches) = matches
                .subcommand()
                .context("Could not determine subcommand")?;

            // Run the specific tool.
            match subcommand_name {
                $(
                    $name => {
                        let output = <$tool>::from_arg_matches(subcommand_matches)
                            .context("Could not initialize the tool")?
                            .execute()
                            .context("Could not execute tool")?;

                        Ok(output)
                    }
                )*
                _ => {
                    Err(anyhow!("Unknown subcommand"))
                }
            }
        }
    };
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut cli = clap::builder::Command::new("qrforge").about("a styled QR code designer");

    let output = toolbox!(
        cli,
        (tools::link::LinkTool, "link",),
        (tools::text::TextTool, "text",),
        (tools::email::EmailTool, "email",),
        (tools::wifi::WifiTool, "wifi",),
        (tools::whatsapp::WhatsAppTool, "whatsapp", "wa"),
        (tools::file::FileTool, "file",),
        (tools::presets::PresetsTool, "presets",)
    )
    .context("Could not run tool")?;

    match output {
        Some(Output::Bytes(bytes)) => {
            io::stdout()
                .write_all(&bytes)
                .context("Could not write bytes to stdout")?;
        }
        Some(Output::Text(text)) => {
            println!("{}", text);
        }
        Some(Output::JsonValue(value)) => {
            print!(
                "{}",
                serde_json::to_string_pretty(&value).context("Could not serialize result")?
            );
        }
        None => {}
    }

    Ok(())
}
