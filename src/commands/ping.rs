use crate::types::{Button, ButtonRow, ButtonStyle, Reply};

pub fn run() -> Reply {
  Reply::public("Pong!").with_buttons(ButtonRow::of(vec![Button::new(
    "ping_again",
    "Ping Again",
    ButtonStyle::Primary,
  )]))
}
