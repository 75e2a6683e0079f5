use std::fs;

use anyhow::{Context, Ok, Result};

use super::super::args::ConvertCommand;
use super::{CommandResult, CommandSummary, ConvertSummary, helper::finish};
use crate::core::po::encoding::{decode, declare_utf8, encoding_for_label, normalize_layout};

pub fn convert(cmd: ConvertCommand) -> Result<CommandResult> {
    let path = &cmd.catalog;
    let forced = cmd.encoding.as_deref().map(encoding_for_label).transpose()?;
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read catalog: {}", path.display()))?;

    let decoded = decode(&bytes, forced)
        .with_context(|| format!("Failed to decode catalog: {}", path.display()))?;
    let text = if decoded.transcoded() {
        declare_utf8(&decoded.text)
    } else {
        decoded.text.as_str().into()
    };
    let normalized = normalize_layout(&text);
    let changed = normalized.as_bytes() != bytes.as_slice();

    let output_path = cmd.output.clone().unwrap_or_else(|| path.clone());
    // An in-place conversion that changes nothing leaves the file untouched.
    if changed || cmd.output.is_some() {
        if let Some(parent) = output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&output_path, &normalized)
            .with_context(|| format!("Failed to write catalog: {}", output_path.display()))?;
    }

    Ok(finish(
        CommandSummary::Convert(ConvertSummary {
            output_path,
            source_encoding: decoded.encoding.name(),
            removed_bom: decoded.had_bom,
            original_lines: decoded.text.lines().count(),
            lines: normalized.lines().count(),
            changed,
        }),
        Vec::new(),
        1,
        true,
    ))
}
