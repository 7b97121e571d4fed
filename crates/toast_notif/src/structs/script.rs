//! PowerShell scripts handed to the scripting host.

/// App id used when showing a toast without one
pub const DEFAULT_APP_ID: &str = "Windows App";
/// App id registered by a manager created without one
pub const DEFAULT_REGISTERED_APP_ID: &str = "com.windows.app";
pub const DEFAULT_DISPLAY_NAME: &str = "Windows App";

/// Quotes `value` as a single quoted PowerShell string.
///
/// PowerShell also treats the typographic single quotes as delimiters, so
/// those are doubled as well.
pub(crate) fn quote(value: &str) -> String {
  let mut quoted = String::with_capacity(value.len() + 2);
  quoted.push('\'');
  for c in value.chars() {
    if matches!(c, '\'' | '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}') {
      quoted.push(c);
    }
    quoted.push(c);
  }
  quoted.push('\'');
  quoted
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
  if value.is_empty() {
    default
  } else {
    value
  }
}

/// Loads `xml` into a `ToastNotification` and shows it for `app_id`.
///
/// The xml goes into a literal here-string. It must not contain a line that
/// starts with a quote followed by `@`, which escaped toast xml never does.
pub fn show_script(app_id: &str, xml: &str) -> String {
  format!(
    r#"$ErrorActionPreference = 'Stop'

[Windows.UI.Notifications.ToastNotificationManager, Windows.UI.Notifications, ContentType = WindowsRuntime] | Out-Null
[Windows.UI.Notifications.ToastNotification, Windows.UI.Notifications, ContentType = WindowsRuntime] | Out-Null
[Windows.Data.Xml.Dom.XmlDocument, Windows.Data.Xml.Dom.XmlDocument, ContentType = WindowsRuntime] | Out-Null

$AppId = {app_id}
$Template = @'
{xml}
'@

$Xml = New-Object Windows.Data.Xml.Dom.XmlDocument
$Xml.LoadXml($Template)
$Toast = New-Object Windows.UI.Notifications.ToastNotification $Xml
[Windows.UI.Notifications.ToastNotificationManager]::CreateToastNotifier($AppId).Show($Toast)
"#,
    app_id = quote(or_default(app_id, DEFAULT_APP_ID)),
  )
}

/// Registers `app_id` under the current user so toasts sent with it are
/// shown with `display_name` and `icon`. Running it again is harmless.
pub fn register_script(app_id: &str, display_name: &str, icon: &str) -> String {
  format!(
    r#"$ErrorActionPreference = 'Stop'

$AppId = {app_id}
$AppDisplayName = {display_name}
$LogoImagePath = {icon}

$RegPathToastSettings = 'HKCU:\Software\Microsoft\Windows\CurrentVersion\Notifications\Settings'
$RegPathToastApp = 'HKCU:\Software\Classes\AppUserModelId'

New-Item -Path "$RegPathToastSettings\$AppId" -Force | Out-Null
Set-ItemProperty -Path "$RegPathToastSettings\$AppId" -Name 'ShowInActionCenter' -Value 1 -Force
Set-ItemProperty -Path "$RegPathToastSettings\$AppId" -Name 'Enabled' -Value 1 -Force

New-Item -Path "$RegPathToastApp\$AppId" -Force | Out-Null
Set-ItemProperty -Path "$RegPathToastApp\$AppId" -Name 'DisplayName' -Value $AppDisplayName -Force
Set-ItemProperty -Path "$RegPathToastApp\$AppId" -Name 'IconUri' -Value $LogoImagePath -Force
"#,
    app_id = quote(or_default(app_id, DEFAULT_REGISTERED_APP_ID)),
    display_name = quote(or_default(display_name, DEFAULT_DISPLAY_NAME)),
    icon = quote(icon),
  )
}
