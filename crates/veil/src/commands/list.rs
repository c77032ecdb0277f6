use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

pub fn execute() {
    let windows = match veil_windows::enumerate_windows() {
        Ok(windows) => windows,
        Err(e) => {
            eprintln!("Error: could not enumerate windows: {e}");
            std::process::exit(1);
        }
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("HWND"),
            Cell::new("PID").set_alignment(CellAlignment::Right),
            Cell::new("Title"),
        ]);

    for window in &windows {
        let pid = window.pid.map(|p| p.to_string()).unwrap_or_default();
        table.add_row(vec![
            Cell::new(window.handle),
            Cell::new(pid).set_alignment(CellAlignment::Right),
            Cell::new(&window.title),
        ]);
    }

    println!("{table}");
    println!("\n{} windows found", windows.len());
}
