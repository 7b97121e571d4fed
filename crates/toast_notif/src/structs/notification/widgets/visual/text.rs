use crate::{structs::notification::widgets::escape_xml, ToXML, ToastError};

/// Learn more here
/// <https://learn.microsoft.com/en-us/uwp/schemas/tiles/toastschema/element-text>
pub struct Text<'a> {
  field: &'static str,
  body: &'a str,
}

impl<'a> Text<'a> {
  /// `field` names the value in render errors
  pub fn create(field: &'static str, body: &'a str) -> Self {
    Self { field, body }
  }
}

impl ToXML for Text<'_> {
  fn to_xml(&self) -> Result<String, ToastError> {
    Ok(format!("<text>{}</text>", escape_xml(self.field, self.body)?))
  }
}
