use serde::{Deserialize, Serialize};

/// HSL color with fixed-point degree hue and percent saturation/lightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

/// Saturation/lightness shared by every category swatch.
const SATURATION: u8 = 75;
const LIGHTNESS: u8 = 85;

impl Hsl {
    pub fn css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }

    /// Convert to 8-bit RGB (used by the PDF export).
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let h = f64::from(self.h) % 360.0;
        let s = f64::from(self.s) / 100.0;
        let l = f64::from(self.l) / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h as u32 {
            0..=59 => (c, x, 0.0),
            60..=119 => (x, c, 0.0),
            120..=179 => (0.0, c, x),
            180..=239 => (0.0, x, c),
            240..=299 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        (
            ((r + m) * 255.0).round() as u8,
            ((g + m) * 255.0).round() as u8,
            ((b + m) * 255.0).round() as u8,
        )
    }
}

/// Immutable category-to-color mapping.
///
/// Built once from the ordered list of top-level category names: hues are
/// spread evenly over the spectrum (step = 359/N, centered in each band) at
/// fixed saturation and lightness, so the assignment is deterministic and
/// injective for a given input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorMap {
    entries: Vec<(String, Hsl)>,
}

impl ColorMap {
    pub fn assign(categories: &[String]) -> Self {
        let step = 359.0 / categories.len().max(1) as f64;
        let entries = categories
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let hue = (i as f64 * step + step / 2.0).round() as u16;
                (
                    name.clone(),
                    Hsl {
                        h: hue,
                        s: SATURATION,
                        l: LIGHTNESS,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, category: &str) -> Option<Hsl> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|&(_, color)| color)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Hsl)> {
        self.entries.iter().map(|(name, color)| (name.as_str(), *color))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn hues_are_centered_in_even_bands() {
        let map = ColorMap::assign(&names(&["Action", "Drama", "Comedy", "Horror"]));
        let hues: Vec<u16> = map.iter().map(|(_, c)| c.h).collect();
        // step = 359/4 = 89.75, hue_i = round(i*step + step/2)
        assert_eq!(hues, vec![45, 135, 224, 314]);
        for (_, c) in map.iter() {
            assert_eq!((c.s, c.l), (75, 85));
        }
    }

    #[test]
    fn assignment_is_deterministic_and_injective() {
        let cats = names(&["Action", "Drama", "Comedy", "Adventure", "Family"]);
        let a = ColorMap::assign(&cats);
        let b = ColorMap::assign(&cats);
        let hues_a: Vec<u16> = a.iter().map(|(_, c)| c.h).collect();
        let hues_b: Vec<u16> = b.iter().map(|(_, c)| c.h).collect();
        assert_eq!(hues_a, hues_b);
        let mut deduped = hues_a.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), cats.len());
    }

    #[test]
    fn css_formatting() {
        let c = Hsl { h: 45, s: 75, l: 85 };
        assert_eq!(c.css(), "hsl(45, 75%, 85%)");
    }

    #[test]
    fn rgb_conversion_stays_pastel() {
        // l=85% with s=75% keeps every channel in the pastel range.
        let map = ColorMap::assign(&names(&["Action", "Drama", "Comedy"]));
        for (_, c) in map.iter() {
            let (r, g, b) = c.to_rgb();
            for ch in [r, g, b] {
                assert!(ch >= 180, "channel {} too dark for {:?}", ch, c);
            }
        }
    }

    #[test]
    fn lookup_by_category() {
        let map = ColorMap::assign(&names(&["Action", "Drama"]));
        assert!(map.get("Action").is_some());
        assert!(map.get("Western").is_none());
    }
}
