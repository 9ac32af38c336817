use crate::commands::Invocation;
use crate::types::Reply;

pub fn run(inv: &Invocation) -> Reply {
  let content = format!(
    "Server Information\nServer ID: {}\nOwner: <@{}>",
    inv.guild_id, inv.guild_owner_id
  );
  Reply::ephemeral(content)
}
