//! Profile display formatting

use crate::models::Profile;

/// Format the profile and its preferences
pub fn format_profile(profile: &Profile) -> String {
    let prefs = &profile.preferences;
    let mut output = String::new();

    output.push_str(&format!("Profile: {}\n", profile.display_name()));
    output.push_str(&"=".repeat(40));
    output.push('\n');
    output.push_str(&format!("Username:    {}\n", profile.username));
    if !profile.email.is_empty() {
        output.push_str(&format!("Email:       {}\n", profile.email));
    }
    if let Some(joined) = profile.date_joined {
        output.push_str(&format!(
            "Member since: {}\n",
            prefs.format_date(joined.date_naive())
        ));
    }
    if let Some(last) = profile.last_login {
        output.push_str(&format!(
            "Last login:  {}\n",
            last.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    output.push_str("\nPreferences\n");
    output.push_str(&format!("  Currency:    {}\n", prefs.currency));
    output.push_str(&format!("  Timezone:    {}\n", prefs.timezone));
    output.push_str(&format!("  Date format: {}\n", prefs.date_format));
    if !prefs.avatar_url.is_empty() {
        output.push_str(&format!("  Avatar:      {}\n", prefs.avatar_url));
    }

    output
}
