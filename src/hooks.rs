use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, bail, Context, Result};
use spdlog::info;

use crate::config::CssPlugin;

/// Command line of the CSS hook, `None` when no plugin is configured.
///
/// Tailwind CLI arguments: `command -i input -o output [--minify]`
pub fn css_command(plugin: &CssPlugin, out_dir: &Path) -> Result<Option<Vec<String>>> {
    let CssPlugin::Tailwind { command, input, output, minify } = plugin else {
        return Ok(None);
    };

    if command.is_empty() {
        bail!("The tailwind command is empty");
    }

    let mut args = command.clone();
    args.extend([
        "-i".to_string(),
        input.display().to_string(),
        "-o".to_string(),
        out_dir.join(output).display().to_string(),
    ]);
    if *minify {
        args.push("--minify".to_string());
    }

    Ok(Some(args))
}

pub fn run_css_hook(plugin: &CssPlugin, out_dir: &Path) -> Result<()> {
    let Some(args) = css_command(plugin, out_dir)? else {
        return Ok(());
    };

    info!("Running CSS hook: {}", args.join(" "));
    let (program, rest) = args.split_first()
        .ok_or_else(|| anyhow!("The CSS hook command is empty"))?;

    let status = Command::new(program)
        .args(rest)
        .status()
        .with_context(|| format!("Error starting CSS hook `{}`", program))?;

    if !status.success() {
        bail!("CSS hook `{}` failed with {}", program, status);
    }

    Ok(())
}
