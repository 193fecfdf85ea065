use std::fmt::Write;

use colored::Colorize;

use crate::discovery::DiscoveryMap;

/// Print every found dependency and the files it was found in.
pub fn render(discoveries: &DiscoveryMap, color: bool) {
    print!("{}", format_report(discoveries, color));
}

pub fn format_report(discoveries: &DiscoveryMap, color: bool) -> String {
    let mut out = String::new();
    for (name, paths) in discoveries.iter() {
        let quoted = format!("\"{}\"", name);
        let quoted = if color {
            quoted.bold().to_string()
        } else {
            quoted
        };
        let _ = writeln!(out, "{} found in {} files:", quoted, paths.len());
        for path in paths {
            let _ = writeln!(out, "    {}", path.display());
        }
    }
    out
}
