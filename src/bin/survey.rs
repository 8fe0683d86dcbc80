use anyhow::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use palpng::{describe, load_to_vec, ImageInfo};
use std::{ffi::OsStr, fs};

fn bold_cell(s: &str) -> Cell {
    Cell::new(s).add_attribute(Attribute::Bold)
}

fn main() -> Result<()> {
    env_logger::init();

    let dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./tests".to_owned());

    let mut table = Table::new();
    table.set_header(vec![
        bold_cell("File"),
        bold_cell("Dimensions"),
        bold_cell("Status"),
    ]);

    let mut paths = fs::read_dir(&dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    paths.sort();

    for path in paths {
        let is_png = path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

        if !is_png {
            continue;
        }

        let res = load_to_vec(&path);

        let dimensions = match &res {
            Ok((ImageInfo { width, height, .. }, _)) => format!("{width}x{height}"),
            Err(_) => String::new(),
        };

        let (status, color) = match describe(&res) {
            "" => ("Ok", Color::Green),
            name => (name, Color::Red),
        };

        table.add_row(vec![
            Cell::new(path.display()),
            Cell::new(dimensions),
            Cell::new(status).fg(color),
        ]);
    }

    println!("{table}");

    Ok(())
}
