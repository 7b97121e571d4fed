use crate::{structs::notification::widgets::escape_xml, ToXML, ToastError};

/// The app logo shown to the left of the toast
///
/// Learn more here
/// <https://learn.microsoft.com/en-us/uwp/schemas/tiles/toastschema/element-image>
pub struct Image<'a> {
  src: &'a str,
}

impl<'a> Image<'a> {
  pub fn app_logo(src: &'a str) -> Self {
    Self { src }
  }
}

impl ToXML for Image<'_> {
  fn to_xml(&self) -> Result<String, ToastError> {
    Ok(format!(
      r#"<image placement="appLogoOverride" src="{}" />"#,
      escape_xml("icon", self.src)?
    ))
  }
}
