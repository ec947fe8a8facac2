use safepath_core::GeoPoint;

/// `1234.5` -> `"1.23 km"`, `12.34` -> `"12.3 m"`.
pub fn meters(m: f64) -> String {
    if !m.is_finite() {
        return "-".to_string();
    }
    if m >= 1000.0 {
        format!("{:.2} km", m / 1000.0)
    } else {
        format!("{:.1} m", m)
    }
}

pub fn point(p: Option<GeoPoint>) -> String {
    match p {
        Some(p) => format!("{:.6}, {:.6}", p.lat, p.lng),
        None => "-".to_string(),
    }
}

/// Right-aligned keys, multi-line values indented under the first line.
pub fn print_kv_block<F>(pairs: &[(&str, String)], color_key: F)
where
    F: Fn(&str) -> String,
{
    let key_w = pairs
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0);

    for (k, v) in pairs {
        let key_padded = format!("{:>key_w$}", k, key_w = key_w);
        let key_col = color_key(&key_padded);

        let v = v.trim_end_matches('\n');
        let mut it = v.lines();
        let first = it.next().unwrap_or("");
        println!("{}: {}", key_col, first);
        for line in it {
            println!("{:>key_w$}  {}", "", line, key_w = key_w);
        }
    }
}
