use std::collections::BTreeMap;

use crate::types::{ModalForm, Reply, TextInput};

pub const ANNOUNCE_FORM: &str = "announce_form";

/// The command itself just opens the announcement modal; the content
/// arrives later as a modal submission.
pub fn run() -> Reply {
  let modal = ModalForm {
    custom_id: ANNOUNCE_FORM.to_string(),
    title: "Create Announcement".to_string(),
    inputs: vec![
      TextInput {
        custom_id: "announcement_title".to_string(),
        label: "Announcement Title".to_string(),
        required: true,
        multiline: false,
      },
      TextInput {
        custom_id: "announcement_content".to_string(),
        label: "Announcement Content".to_string(),
        required: true,
        multiline: true,
      },
      TextInput {
        custom_id: "announcement_footer".to_string(),
        label: "Footer Text (Optional)".to_string(),
        required: false,
        multiline: false,
      },
    ],
  };
  Reply::ephemeral("Opening the announcement editor.").with_modal(modal)
}

/// Render a submitted announcement form as a public message.
pub fn submit_announcement(fields: &BTreeMap<String, String>) -> Reply {
  let title = fields
    .get("announcement_title")
    .map(String::as_str)
    .unwrap_or("");
  let content = fields
    .get("announcement_content")
    .map(String::as_str)
    .unwrap_or("");
  if title.is_empty() || content.is_empty() {
    return Reply::ephemeral("An announcement needs both a title and content.");
  }

  let mut message = format!("**{}**\n\n{}", title, content);
  if let Some(footer) = fields.get("announcement_footer") {
    if !footer.is_empty() {
      message.push_str(&format!("\n\n_{}_", footer));
    }
  }
  Reply::public(message)
}
