use crate::{
  structs::notification::{widgets::escape_xml, DEFAULT_ACTIVATION_TYPE},
  ToXML, ToastError,
};

/// A button on the toast
///
/// Learn More Here
/// <https://learn.microsoft.com/en-us/uwp/schemas/tiles/toastschema/element-action>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
  pub activation_type: String,
  pub label: String,
  pub arguments: String,
}

impl Action {
  pub fn new<T: Into<String>, L: Into<String>, A: Into<String>>(
    activation_type: T,
    label: L,
    arguments: A,
  ) -> Self {
    Self {
      activation_type: activation_type.into(),
      label: label.into(),
      arguments: arguments.into(),
    }
  }

  /// A `protocol` button without arguments
  pub fn create<T: Into<String>>(label: T) -> Self {
    Self::new(DEFAULT_ACTIVATION_TYPE, label, "")
  }

  pub fn with_activation_type<T: Into<String>>(mut self, activation_type: T) -> Self {
    self.activation_type = activation_type.into();
    self
  }

  pub fn with_arguments<T: Into<String>>(mut self, arguments: T) -> Self {
    self.arguments = arguments.into();
    self
  }
}

impl ToXML for Action {
  fn to_xml(&self) -> Result<String, ToastError> {
    Ok(format!(
      r#"<action activationType="{}" content="{}" arguments="{}" />"#,
      escape_xml("action type", &self.activation_type)?,
      escape_xml("action label", &self.label)?,
      escape_xml("action arguments", &self.arguments)?,
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_create_defaults_to_protocol() {
    let action = Action::create("Open");
    assert_eq!(action.activation_type, "protocol");
    assert_eq!(action.arguments, "");
  }

  #[test]
  fn test_action_xml() {
    let action = Action::create("Open Maps").with_arguments("bingmaps:?q=sushi&zoom=2");
    assert_eq!(
      action.to_xml().unwrap(),
      r#"<action activationType="protocol" content="Open Maps" arguments="bingmaps:?q=sushi&amp;zoom=2" />"#
    );
  }
}
