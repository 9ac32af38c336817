use crate::types::{Button, ButtonRow, ButtonStyle, Reply};

/// Demo panel for the component system: a row of color picker buttons.
pub fn run() -> Reply {
  let colors = ButtonRow::of(vec![
    Button::new("color_red", "Red", ButtonStyle::Danger),
    Button::new("color_green", "Green", ButtonStyle::Success),
    Button::new("color_blue", "Blue", ButtonStyle::Primary),
  ]);
  Reply::ephemeral("Component Showcase\nPick a color:").with_buttons(colors)
}
