use std::path::Path;

use crate::{
  resolve_icon, script, Action, Audio, Notification, ScriptHost, ToastDuration, ToastError,
  DEFAULT_ACTIVATION_TYPE,
};

/// Builds toasts for one registered app identity
///
/// Creating a manager registers the app id with the notification settings of
/// the current user so Windows shows its toasts with the given name and icon.
#[derive(Debug, Clone)]
pub struct ToastManager {
  app_id: String,
  display_name: String,
  icon: String,
  host: ScriptHost,
}

impl ToastManager {
  pub fn new<A: Into<String>, D: Into<String>, P: AsRef<Path>>(
    app_id: A,
    display_name: D,
    icon_path: P,
  ) -> Result<Self, ToastError> {
    Self::with_host(app_id, display_name, icon_path, ScriptHost::default())
  }

  /// Same as [`ToastManager::new`], running scripts with `host`
  pub fn with_host<A: Into<String>, D: Into<String>, P: AsRef<Path>>(
    app_id: A,
    display_name: D,
    icon_path: P,
    host: ScriptHost,
  ) -> Result<Self, ToastError> {
    let manager = Self {
      app_id: app_id.into(),
      display_name: display_name.into(),
      icon: resolve_icon(icon_path)?,
      host,
    };

    manager.register()?;

    Ok(manager)
  }

  fn register(&self) -> Result<(), ToastError> {
    tracing::info!(
      target: "toast::manager",
      app_id = %self.app_id,
      display_name = %self.display_name,
      icon = %self.icon,
      "Registering app id"
    );

    let script = script::register_script(&self.app_id, &self.display_name, &self.icon);
    self
      .host
      .run(&script)
      .map_err(|source| ToastError::Registration {
        app_id: self.app_id.clone(),
        source: Box::new(source),
      })
  }

  pub fn app_id(&self) -> &str {
    &self.app_id
  }

  pub fn display_name(&self) -> &str {
    &self.display_name
  }

  /// Absolute icon path
  pub fn icon(&self) -> &str {
    &self.icon
  }

  pub fn host(&self) -> &ScriptHost {
    &self.host
  }

  #[allow(clippy::too_many_arguments)]
  pub fn new_toast<T: Into<String>, M: Into<String>, K: Into<String>, G: Into<String>>(
    &self,
    title: T,
    message: M,
    activation_type: K,
    activation_arguments: G,
    actions: Vec<Action>,
    audio: Audio,
    looping: bool,
    duration: ToastDuration,
  ) -> Notification {
    Notification {
      app_id: self.app_id.clone(),
      title: title.into(),
      message: message.into(),
      icon: self.icon.clone(),
      activation_type: activation_type.into(),
      activation_arguments: activation_arguments.into(),
      actions,
      audio: Some(audio),
      looping,
      duration: Some(duration),
    }
  }

  /// Silent, short, `protocol` activated toast without actions
  pub fn new_simple_toast<T: Into<String>, M: Into<String>>(
    &self,
    title: T,
    message: M,
  ) -> Notification {
    self.new_toast(
      title,
      message,
      DEFAULT_ACTIVATION_TYPE,
      "",
      vec![],
      Audio::Silent,
      false,
      ToastDuration::Short,
    )
  }

  /// Shows `notification` with this manager's host
  pub fn show(&self, notification: &Notification) -> Result<(), ToastError> {
    notification.show_with(&self.host)
  }
}

#[cfg(all(test, unix))]
mod tests {
  use super::*;

  fn host(dir: &Path) -> ScriptHost {
    ScriptHost::new()
      .with_program("sh")
      .with_args(["-c".to_string(), format!("cp \"$0\" '{}'", dir.display())])
  }

  #[test]
  fn test_icon_is_made_absolute() {
    let dir = tempfile::tempdir().unwrap();
    let manager =
      ToastManager::with_host("com.windows.app", "", "testdata/icon.png", host(dir.path())).unwrap();

    assert!(Path::new(manager.icon()).is_absolute());
    assert!(manager.icon().ends_with("icon.png"));
  }

  #[test]
  fn test_manager_without_icon() {
    let dir = tempfile::tempdir().unwrap();
    let manager = ToastManager::with_host("com.windows.app", "Windows App", "", host(dir.path())).unwrap();

    assert_eq!(manager.icon(), "");
    assert_eq!(manager.new_simple_toast("Hi", "There").icon, "");

    let scripts = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(scripts, 1);
  }
}
