/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `veil init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# Veil configuration
# Location: ~/.config/veil/config.toml
# Command-line flags override anything set here.

# Keep running after applying changes, until Ctrl+C.
hold = false

[target]
# Exact title of the window to hide from capture. No wildcards.
title = "Secure Window 123"
# Only act if the window belongs to this process ID.
# expected_pid = 1234

[locate]
# Total lookups before giving up (1 to 1000). The target may still be starting.
max_attempts = 10
# Pause between lookups in milliseconds (at most 60000).
retry_delay_ms = 500

[presentation]
# Extended style bits added to the window (all include "layered"):
# "layered": layered only.
# "no-redirection": no compositor redirection surface.
# "pass-through": mouse input falls through to the window beneath.
style = "no-redirection"
# Shorthand for style = "pass-through".
pass_through_input = false
# Window alpha, 0 (invisible) to 255 (opaque).
opacity = 255
# Exclude the window from screen capture.
cloak = true
# "dwm": compositor cloak attribute.
# "display-affinity": exclude-from-capture display affinity.
cloak_method = "dwm"

[logging]
# Enable file logging to ~/.config/veil/logs/veil.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}
