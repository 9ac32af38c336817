use rand::Rng;

use crate::commands::Invocation;
use crate::types::{Button, ButtonRow, ButtonStyle, Reply};

const DEFAULT_SIDES: i64 = 6;

pub fn run(inv: &Invocation) -> Reply {
  let sides = inv.int_option("sides").unwrap_or(DEFAULT_SIDES).clamp(2, 100);
  let count = inv.int_option("count").unwrap_or(1).clamp(1, 10);

  let mut rng = rand::thread_rng();
  let results: Vec<i64> = (0..count).map(|_| rng.gen_range(1..=sides)).collect();
  let total: i64 = results.iter().sum();

  let mut content = format!("Dice Roll\nDice: {}d{}\nResults: ", count, sides);
  content.push_str(
    &results
      .iter()
      .map(|r| r.to_string())
      .collect::<Vec<_>>()
      .join(", "),
  );
  if count > 1 {
    content.push_str(&format!("\nTotal: {}", total));
  }

  Reply::public(content).with_buttons(ButtonRow::of(vec![Button::new(
    "roll_again",
    "Quick Roll (1d6)",
    ButtonStyle::Secondary,
  )]))
}

/// The `roll_again` button: a single plain d6.
pub fn quick_roll() -> Reply {
  let roll = rand::thread_rng().gen_range(1..=DEFAULT_SIDES);
  Reply::ephemeral(format!("You rolled a {}!", roll))
}
