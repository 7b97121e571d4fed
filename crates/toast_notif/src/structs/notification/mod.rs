use std::fmt::Display;

use actions::Action;
use audio::{Audio, Sound};
use visual::{Image, Text};

use super::{host::ScriptHost, script, ToXML};
use crate::ToastError;

mod widgets;
pub use widgets::*;

/// Activation type used when none is given
pub const DEFAULT_ACTIVATION_TYPE: &str = "protocol";

/// How long the toast stays on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastDuration {
  #[default]
  Short,
  Long,
}

/// The accepted user facing names, lowercase
pub(crate) const DURATION_NAMES: [(&str, ToastDuration); 2] =
  [("short", ToastDuration::Short), ("long", ToastDuration::Long)];

impl ToastDuration {
  /// Looks up a user facing name, ignoring case
  pub fn from_name(name: &str) -> Option<Self> {
    let name = name.to_lowercase();
    DURATION_NAMES
      .iter()
      .find(|(known, _)| *known == name)
      .map(|(_, duration)| *duration)
  }

  /// Value of the `duration` attribute
  pub fn as_str(&self) -> &'static str {
    match self {
      ToastDuration::Short => "Short",
      ToastDuration::Long => "Long",
    }
  }
}

impl Display for ToastDuration {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Everything needed to render one toast
///
/// `audio` and `duration` are `None` when the caller left them unset,
/// [`Notification::with_defaults`] fills them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
  pub app_id: String,
  pub title: String,
  pub message: String,
  /// Absolute path, or empty for no icon
  pub icon: String,
  pub activation_type: String,
  pub activation_arguments: String,
  pub actions: Vec<Action>,
  pub audio: Option<Audio>,
  pub looping: bool,
  pub duration: Option<ToastDuration>,
}

macro_rules! impl_with {
  ($x:ident, $field:ident) => {
    pub fn $x<T: Into<String>>(mut self, $field: T) -> Self {
      self.$field = $field.into();
      self
    }
  };
}

impl Notification {
  pub fn new() -> Self {
    Self::default()
  }

  impl_with!(with_app_id, app_id);
  impl_with!(with_title, title);
  impl_with!(with_message, message);
  impl_with!(with_icon, icon);
  impl_with!(with_activation_type, activation_type);
  impl_with!(with_activation_arguments, activation_arguments);

  pub fn action(mut self, action: Action) -> Self {
    self.actions.push(action);
    self
  }

  pub fn actions(mut self, actions: Vec<Action>) -> Self {
    self.actions = actions;
    self
  }

  pub fn with_audio(mut self, audio: Audio) -> Self {
    self.audio = Some(audio);
    self
  }

  pub fn with_loop(mut self, looping: bool) -> Self {
    self.looping = looping;
    self
  }

  pub fn with_duration(mut self, duration: ToastDuration) -> Self {
    self.duration = Some(duration);
    self
  }

  /// Fills the unset activation type, duration and audio.
  ///
  /// Applying it twice gives the same notification.
  pub fn with_defaults(mut self) -> Self {
    if self.activation_type.is_empty() {
      self.activation_type = DEFAULT_ACTIVATION_TYPE.to_string();
    }
    self.duration.get_or_insert(ToastDuration::Short);
    self.audio.get_or_insert(Audio::Default);
    self
  }

  /// Renders the toast XML
  pub fn render(&self) -> Result<String, ToastError> {
    self.to_xml()
  }

  /// Renders the PowerShell script that shows this toast
  pub fn script(&self) -> Result<String, ToastError> {
    Ok(script::show_script(&self.app_id, &self.render()?))
  }

  /// Shows the toast with the default PowerShell host
  pub fn show(&self) -> Result<(), ToastError> {
    self.show_with(&ScriptHost::default())
  }

  /// Applies the defaults, renders, stages and dispatches the toast
  pub fn show_with(&self, host: &ScriptHost) -> Result<(), ToastError> {
    let notification = self.clone().with_defaults();
    let script = notification.script()?;

    tracing::debug!(
      target: "toast::notification",
      app_id = %notification.app_id,
      actions = notification.actions.len(),
      audio = %notification.audio.unwrap_or_default(),
      "Showing toast"
    );

    host.run(&script)
  }
}

impl ToXML for Notification {
  fn to_xml(&self) -> Result<String, ToastError> {
    let mut visual = vec![];
    if !self.icon.is_empty() {
      visual.push(Image::app_logo(&self.icon).to_xml()?);
    }
    if !self.title.is_empty() {
      visual.push(Text::create("title", &self.title).to_xml()?);
    }
    if !self.message.is_empty() {
      visual.push(Text::create("message", &self.message).to_xml()?);
    }

    let activation_type = match self.activation_type.as_str() {
      "" => DEFAULT_ACTIVATION_TYPE,
      x => x,
    };

    let mut lines = vec![
      format!(
        r#"<toast activationType="{}" launch="{}" duration="{}">"#,
        widgets::escape_xml("activation type", activation_type)?,
        widgets::escape_xml("activation arguments", &self.activation_arguments)?,
        self.duration.unwrap_or_default(),
      ),
      "<visual>".to_string(),
      r#"<binding template="ToastGeneric">"#.to_string(),
    ];
    lines.extend(visual);
    lines.push("</binding>".to_string());
    lines.push("</visual>".to_string());
    lines.push(Sound::new(self.audio.unwrap_or_default(), self.looping).to_xml()?);

    if !self.actions.is_empty() {
      lines.push("<actions>".to_string());
      lines.push(crate::map!(self.actions)?);
      lines.push("</actions>".to_string());
    }
    lines.push("</toast>".to_string());

    Ok(lines.join("\n"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn full() -> Notification {
    Notification::new()
      .with_app_id("com.windows.app")
      .with_title("Hello World")
      .with_message("Lorem ipsum")
      .with_icon(r"C:\icons\app.png")
      .with_activation_type("protocol")
      .with_activation_arguments("https://example.com")
      .action(Action::create("Open Maps").with_arguments("bingmaps:?q=sushi"))
      .action(Action::create("Cancel"))
      .with_audio(Audio::Reminder)
      .with_loop(true)
      .with_duration(ToastDuration::Long)
  }

  #[test]
  fn test_duration_names() {
    assert_eq!(ToastDuration::from_name("SHORT"), Some(ToastDuration::Short));
    assert_eq!(ToastDuration::from_name("Long"), Some(ToastDuration::Long));
    assert_eq!(ToastDuration::from_name("forever"), None);
  }

  #[test]
  fn test_empty_sections_are_omitted() {
    let xml = Notification::new().render().unwrap();

    assert!(!xml.contains("<image"));
    assert!(!xml.contains("<text"));
    assert!(!xml.contains("<actions"));
    assert!(!xml.contains("<action "));
  }

  #[test]
  fn test_full_render() {
    let xml = full().render().unwrap();

    assert_eq!(
      xml,
      [
        r#"<toast activationType="protocol" launch="https://example.com" duration="Long">"#,
        "<visual>",
        r#"<binding template="ToastGeneric">"#,
        r#"<image placement="appLogoOverride" src="C:\icons\app.png" />"#,
        "<text>Hello World</text>",
        "<text>Lorem ipsum</text>",
        "</binding>",
        "</visual>",
        r#"<audio src="ms-winsoundevent:Notification.Reminder" loop="true" />"#,
        "<actions>",
        r#"<action activationType="protocol" content="Open Maps" arguments="bingmaps:?q=sushi" />"#,
        r#"<action activationType="protocol" content="Cancel" arguments="" />"#,
        "</actions>",
        "</toast>",
      ]
      .join("\n")
    );
  }

  #[test]
  fn test_only_message_renders_one_text() {
    let xml = Notification::new().with_message("body only").render().unwrap();
    assert_eq!(xml.matches("<text>").count(), 1);
    assert!(xml.contains("<text>body only</text>"));
  }

  #[test]
  fn test_silent_audio() {
    let xml = full().with_audio(Audio::Silent).render().unwrap();
    assert!(xml.contains(r#"<audio silent="true" />"#));
    assert!(!xml.contains("<audio src="));
  }

  #[test]
  fn test_render_is_deterministic() {
    assert_eq!(full().render().unwrap(), full().render().unwrap());
  }

  #[test]
  fn test_render_rejects_invalid_characters() {
    let err = full().with_title("nul\u{0}").render().unwrap_err();
    assert!(matches!(err, ToastError::Render(_)));
  }

  #[test]
  fn test_defaults() {
    let notification = Notification::new().with_defaults();

    assert_eq!(notification.activation_type, "protocol");
    assert_eq!(notification.duration, Some(ToastDuration::Short));
    assert_eq!(notification.audio, Some(Audio::Default));
  }

  #[test]
  fn test_defaults_keep_explicit_values() {
    let notification = full().with_defaults();
    assert_eq!(notification, full());
  }

  #[test]
  fn test_defaults_are_idempotent() {
    let once = Notification::new().with_title("x").with_defaults();
    assert_eq!(once.clone().with_defaults(), once);
  }

  #[test]
  fn test_unset_fields_render_like_defaults() {
    let unset = Notification::new().with_title("x");
    assert_eq!(
      unset.render().unwrap(),
      unset.clone().with_defaults().render().unwrap()
    );
  }

  #[test]
  fn test_script_embeds_markup() {
    let notification = full();
    let script = notification.script().unwrap();

    assert!(script.contains(&notification.render().unwrap()));
    assert!(script.contains("$AppId = 'com.windows.app'"));
  }
}
