use crate::types::Reply;

pub fn run(user_id: &str) -> Reply {
  Reply::public(format!("Hello, <@{}>!", user_id))
}
