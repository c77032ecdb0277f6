use clap::Args;

use veil_core::{LocatePolicy, ThreadSleep, VeilError, WindowHandle};
use veil_windows::Desktop;

use super::options::CloakArg;

/// Arguments for the `inspect` subcommand.
#[derive(Args)]
#[command(group = clap::ArgGroup::new("target").required(true))]
pub struct InspectArgs {
    /// Exact title of the window
    #[arg(long, short, group = "target")]
    title: Option<String>,
    /// Window handle (decimal or hex with 0x prefix)
    #[arg(long, group = "target")]
    hwnd: Option<WindowHandle>,
    /// Which capture-exclusion attribute to read
    #[arg(long, value_enum, default_value = "dwm")]
    cloak_method: CloakArg,
}

pub fn execute(args: &InspectArgs) {
    let handle = match resolve_handle(args) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    let state = veil_core::inspect(&Desktop, handle, args.cloak_method.into());
    println!("{state}");
}

/// Picks the window to inspect: a title is looked up once, otherwise
/// the given handle is used as-is.
fn resolve_handle(args: &InspectArgs) -> Result<WindowHandle, VeilError> {
    if let Some(title) = &args.title {
        return veil_core::locate(&Desktop, &ThreadSleep, title, &LocatePolicy::single())
            .map(|found| found.handle);
    }
    let Some(handle) = args.hwnd else {
        return Err(VeilError::Config("pass --title or --hwnd".into()));
    };
    Ok(handle)
}
