use std::error;

/// Distance at which shading reaches the last glyph of the palette.
pub const MAX_SHADE_DISTANCE: f64 = 30.0;

/// Glyphs ordered from near/dense to far/sparse, plus the glyph for misses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    glyphs: Vec<char>,
    background: char,
}

/// palette must contain at least one glyph
#[derive(Debug, displaydoc::Display)]
pub struct PaletteError;

impl error::Error for PaletteError {}

impl Palette {
    pub const WALLS: &'static str =
        "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'.";

    pub fn new(glyphs: &str, background: char) -> Result<Palette, PaletteError> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(PaletteError);
        }
        Ok(Palette { glyphs, background })
    }

    pub fn background(&self) -> char {
        self.background
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Glyph for a hit `distance` away from the camera.
    pub fn glyph(&self, distance: f64) -> char {
        let n = self.glyphs.len();
        let d = distance.clamp(0.0, MAX_SHADE_DISTANCE);
        // d == MAX_SHADE_DISTANCE lands one past the end.
        let i = (d / MAX_SHADE_DISTANCE * n as f64) as usize;
        self.glyphs[i.min(n - 1)]
    }

    pub fn shade(&self, hit: Option<f64>) -> char {
        match hit {
            Some(distance) => self.glyph(distance),
            None => self.background,
        }
    }
}

impl Default for Palette {
    fn default() -> Palette {
        Palette { glyphs: Palette::WALLS.chars().collect(), background: ' ' }
    }
}

#[test]
fn test_glyph_range() {
    let palette = Palette::default();
    assert_eq!(palette.len(), 69);
    assert_eq!(palette.glyph(0.0), '$');
    assert_eq!(palette.glyph(-3.0), '$');
    assert_eq!(palette.glyph(8.0), 'w');
    assert_eq!(palette.glyph(MAX_SHADE_DISTANCE), '.');
    assert_eq!(palette.glyph(1e9), '.');
    assert_eq!(palette.shade(None), ' ');
    assert_eq!(palette.shade(Some(0.0)), '$');
}

#[test]
fn test_custom_palette() {
    assert!(Palette::new("", ' ').is_err());
    let palette = Palette::new("#+", '.').unwrap();
    assert_eq!(palette.shade(Some(14.9)), '#');
    assert_eq!(palette.shade(Some(15.0)), '+');
    assert_eq!(palette.shade(Some(30.0)), '+');
    assert_eq!(palette.shade(None), '.');
}
