// Yarn palettes shipped with the crate.  Colors go from the coldest
// bucket (first) to the hottest (last).

use std::ops::Deref;
use lazy_static::lazy_static;
pub(crate) mod ty;
use ty::*;

lazy_static! {
  pub(crate) static ref AUTUMN: PaletteData = PaletteData::new(
    "Autumn Classic", "Warm autumn tones",
    &[("#2C3E50", "Navy Blue"), ("#34495E", "Charcoal Grey"),
      ("#7F8C8D", "Light Grey"), ("#BDC3C7", "Beige"),
      ("#F39C12", "Orange"), ("#E67E22", "Terracotta"),
      ("#D35400", "Rust"), ("#C0392B", "Burgundy")]);

  pub(crate) static ref OCEAN: PaletteData = PaletteData::new(
    "Deep Ocean", "Soothing ocean gradient",
    &[("#1A237E", "Midnight Blue"), ("#303F9F", "Royal Blue"),
      ("#3F51B5", "Cobalt Blue"), ("#5C6BC0", "Lavender Blue"),
      ("#7986CB", "Sky Blue"), ("#9FA8DA", "Pale Blue"),
      ("#C5CAE9", "Glacier Blue"), ("#E8EAF6", "Off White")]);

  pub(crate) static ref FOREST: PaletteData = PaletteData::new(
    "Enchanted Forest", "Natural forest greens",
    &[("#1B5E20", "Fir Green"), ("#2E7D32", "Forest Green"),
      ("#388E3C", "Moss Green"), ("#4CAF50", "Meadow Green"),
      ("#66BB6A", "Soft Green"), ("#81C784", "Mint Green"),
      ("#A5D6A7", "Almond Green"), ("#C8E6C9", "Pastel Green")]);

  pub(crate) static ref SUNSET: PaletteData = PaletteData::new(
    "Sunset", "Warm sunset colors",
    &[("#4A148C", "Deep Violet"), ("#7B1FA2", "Violet"),
      ("#9C27B0", "Magenta"), ("#E91E63", "Fuchsia Pink"),
      ("#FF5722", "Coral Red"), ("#FF9800", "Bright Orange"),
      ("#FFC107", "Golden Yellow"), ("#FFEB3B", "Lemon Yellow")]);

  pub(crate) static ref NORDIC: PaletteData = PaletteData::new(
    "Nordic Winter", "Cold winter tones",
    &[("#263238", "Charcoal"), ("#37474F", "Slate Grey"),
      ("#455A64", "Steel Grey"), ("#546E7A", "Blue Grey"),
      ("#607D8B", "Pearl Grey"), ("#78909C", "Silver Grey"),
      ("#90A4AE", "Light Grey"), ("#B0BEC5", "Snow White")]);

  pub(crate) static ref MEADOW: PaletteData = PaletteData::new(
    "Spring Meadow", "Soft spring pinks",
    &[("#880E4F", "Burgundy Pink"), ("#AD1457", "Dark Pink"),
      ("#C2185B", "Cherry Pink"), ("#E91E63", "Bright Pink"),
      ("#EC407A", "Candy Pink"), ("#F48FB1", "Powder Pink"),
      ("#F8BBD9", "Pale Pink"), ("#FCE4EC", "Pearl Pink")]);

  pub(crate) static ref BLUE_RED: PaletteData = PaletteData::new(
    "Blue-Red", "Diverging blue to red",
    &[("#08306B", "Dark Blue"), ("#2171B5", "Medium Blue"),
      ("#6BAED6", "Light Blue"), ("#BDD7E7", "Pale Blue"),
      ("#FEE0D2", "Light Rose"), ("#FC9272", "Medium Rose"),
      ("#DE2D26", "Red"), ("#A50F15", "Dark Red")]);

  pub(crate) static ref ALL_PALETTES: [&'static PaletteData; 7] = [
    AUTUMN.deref(), OCEAN.deref(), FOREST.deref(), SUNSET.deref(),
    NORDIC.deref(), MEADOW.deref(), BLUE_RED.deref()];
}
