const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Human-readable object size, e.g. `29.2 KiB`. Plain bytes below 1 KiB.
pub fn format_size(size: u64) -> String {
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{size} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
