use crate::commands::Invocation;
use crate::types::Reply;

pub fn run(inv: &Invocation) -> Reply {
  match inv.str_option("text") {
    Some(text) if !text.trim().is_empty() => Reply::public(text.trim()),
    _ => Reply::ephemeral("You need to provide text for me to say."),
  }
}
