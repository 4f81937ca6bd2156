use clap::{Command, CommandFactory, Parser};
use serde_json::json;

use crate::style::Preset;
use crate::tool::{Output, Tool};

#[derive(Parser, Debug)]
#[command(name = "presets", about = "List the built-in style presets")]
pub struct PresetsTool {}

impl Tool for PresetsTool {
    fn cli() -> Command {
        PresetsTool::command()
    }

    fn execute(&self) -> anyhow::Result<Option<Output>> {
        let presets = Preset::ALL
            .iter()
            .map(|preset| {
                let palette = preset.palette();
                json!({
                    "name": preset.name(),
                    "dotColor": palette.dot_color.to_css_hex(),
                    "cornerColor": palette.corner_color.to_css_hex(),
                    "backgroundColor": palette.background_color.to_css_hex(),
                    "dotShape": palette.dot_shape.name(),
                    "cornerShape": palette.corner_shape.name(),
                })
            })
            .collect::<Vec<_>>();

        Ok(Some(Output::JsonValue(json!(presets))))
    }
}
