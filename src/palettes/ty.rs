pub(crate) use rgb::RGBA;

/// A built-in yarn palette.
pub(crate) struct PaletteData {
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) rgb: Vec<RGBA<f64>>, // Invariant: length ≥ 2
    pub(crate) yarn: Vec<&'static str>, // Invariant: same length as `rgb`
}

impl PaletteData {
    /// `colors` must be valid `#rrggbb` literals; the tables in
    /// `palettes.rs` are the only callers.
    pub(crate) fn new(name: &'static str, description: &'static str,
                      colors: &[(&'static str, &'static str)]) -> Self {
        let rgb = colors.iter()
            .map(|(hex, _)| crate::parse_hex(hex)
                 .expect("built-in palette color"))
            .collect();
        let yarn = colors.iter().map(|&(_, n)| n).collect();
        PaletteData { name, description, rgb, yarn }
    }
}
