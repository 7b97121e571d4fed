use quick_xml::escape::escape;

use crate::ToastError;

pub mod actions;
pub mod audio;
pub mod visual;

fn is_xml_char(c: char) -> bool {
  matches!(c,
    '\t' | '\n' | '\r'
    | '\u{20}'..='\u{D7FF}'
    | '\u{E000}'..='\u{FFFD}'
    | '\u{10000}'..='\u{10FFFF}')
}

/// Escapes `value` for use as XML text or as a double quoted attribute.
///
/// Line breaks become character references so no user supplied text can
/// start a line of the generated script.
pub(crate) fn escape_xml(field: &str, value: &str) -> Result<String, ToastError> {
  if let Some(c) = value.chars().find(|c| !is_xml_char(*c)) {
    return Err(ToastError::Render(format!(
      "{field} contains the character U+{:04X} which is not allowed in XML",
      c as u32
    )));
  }

  Ok(
    escape(value)
      .replace('\r', "&#13;")
      .replace('\n', "&#10;"),
  )
}
