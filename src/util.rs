use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use eframe::egui::Color32;

/// Deterministic per-id point in [0,1)^2, used to seed node positions.
pub fn stable_unit_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / (u32::MAX as f64 + 1.0)) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / (u32::MAX as f64 + 1.0)) as f32;
    (x, y)
}

pub fn parse_hex_color(value: &str) -> Option<Color32> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_unit_pair_is_deterministic_and_in_range() {
        for id in ["helix-bio", "northbridge-capital", "ada", ""] {
            let (x, y) = stable_unit_pair(id);
            assert_eq!((x, y), stable_unit_pair(id));
            assert!((0.0..1.0).contains(&x), "x out of range for {id}: {x}");
            assert!((0.0..1.0).contains(&y), "y out of range for {id}: {y}");
        }
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(
            parse_hex_color("#1f77b4"),
            Some(Color32::from_rgb(0x1f, 0x77, 0xb4))
        );
        assert_eq!(parse_hex_color("1f77b4"), None);
        assert_eq!(parse_hex_color("#1f77b"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }
}
