//! Color math shared by every renderer
//!
//! Colors are plain RGB tuples so the core stays independent of any
//! terminal or graphics backend.

pub type Rgb = (u8, u8, u8);

/// Player color at full health
pub const PLAYER_HEALTHY: Rgb = (68, 170, 255);
pub const BACKGROUND: Rgb = (10, 10, 15);
pub const HEAL: Rgb = (100, 220, 120);
pub const DAMAGE: Rgb = (255, 90, 90);
pub const MISS: Rgb = (140, 140, 150);
pub const TEXT: Rgb = (220, 220, 210);
pub const TEXT_MUTED: Rgb = (120, 120, 115);
pub const GOLD: Rgb = (255, 221, 0);
pub const MANA: Rgb = (90, 130, 240);

/// Parse `#rgb` or `#rrggbb`
pub fn parse_hex(color: &str) -> Option<Rgb> {
    let hex = color.strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| channel(&c.to_string()).map(|v| v * 17));
            Some((it.next()??, it.next()??, it.next()??))
        }
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

/// Player color drifts from blue to red as hp drops
pub fn player_color(hp_ratio: f32) -> Rgb {
    let t = hp_ratio.clamp(0.0, 1.0);
    let r = (255.0 * (1.0 - t) + 68.0 * t).floor() as u8;
    let g = 68;
    let b = (255.0 * t).floor() as u8;
    (r, g, b)
}

/// Enemy color darkens as it loses hp, down to 30% brightness
pub fn enemy_color(base: Rgb, hp_ratio: f32) -> Rgb {
    let darkness = 0.3 + hp_ratio.clamp(0.0, 1.0) * 0.7;
    let scale = |c: u8| (c as f32 * darkness).floor() as u8;
    (scale(base.0), scale(base.1), scale(base.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#f66"), Some((255, 102, 102)));
        assert_eq!(parse_hex("#922"), Some((153, 34, 34)));
        assert_eq!(parse_hex("#0a0a0f"), Some((10, 10, 15)));
        assert_eq!(parse_hex("f66"), None);
        assert_eq!(parse_hex("#ggg"), None);
        assert_eq!(parse_hex("#1234"), None);
    }

    #[test]
    fn test_player_color_by_health() {
        assert_eq!(player_color(1.0), (68, 68, 255));
        assert_eq!(player_color(0.0), (255, 68, 0));
    }

    #[test]
    fn test_enemy_color_darkens() {
        assert_eq!(enemy_color((255, 68, 68), 1.0), (255, 68, 68));
        assert_eq!(enemy_color((100, 100, 100), 0.0), (30, 30, 30));
    }
}
