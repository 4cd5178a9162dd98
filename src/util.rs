use anyhow::{Context, Result, anyhow};
use eframe::egui::Color32;

/// Parses `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex_color(value: &str) -> Result<Color32> {
    let digits = value
        .trim()
        .strip_prefix('#')
        .ok_or_else(|| anyhow!("color {value:?} must start with '#'"))?;

    if !matches!(digits.len(), 6 | 8) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(anyhow!("color {value:?} must be #rrggbb or #rrggbbaa"));
    }

    let channel = |index: usize| {
        u8::from_str_radix(&digits[index * 2..index * 2 + 2], 16)
            .with_context(|| format!("color {value:?} has a non-hex channel"))
    };

    let (r, g, b) = (channel(0)?, channel(1)?, channel(2)?);
    let a = if digits.len() == 8 { channel(3)? } else { 255 };
    Ok(Color32::from_rgba_unmultiplied(r, g, b, a))
}
