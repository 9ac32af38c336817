mod protocol;

pub use protocol::{
  Button, ButtonRow, ButtonStyle, Interaction, ModalForm, Reply, TextInput,
};
