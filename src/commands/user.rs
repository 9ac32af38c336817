use crate::commands::Invocation;
use crate::types::Reply;

/// Profile card built from envelope data; richer profile lookups are the
/// platform client's concern.
pub fn run(inv: &Invocation) -> Reply {
  let content = format!(
    "Your Profile\nUser ID: {}\nServer: {}",
    inv.user_id, inv.guild_id
  );
  Reply::ephemeral(content)
}
