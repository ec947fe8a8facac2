pub mod check;
pub mod config;
pub mod db;
pub mod replay;
pub mod session;

use safepath_core::StatusReport;

use crate::cli::color::Colors;
use crate::cli::format::{meters, print_kv_block};
use crate::ui::{Style, status_badge};

/// Badge line followed by the nearest-segment details, when known.
pub(crate) fn print_report(report: &StatusReport) {
    let style = Style::default();
    let c = Colors::new(&style);

    println!("{}", status_badge(report.status, style));

    let mut pairs = vec![("Tolerance", meters(report.tolerance_m))];
    if let Some(n) = &report.nearest {
        pairs.push((
            "Distance",
            c.distance(n.distance_m, report.tolerance_m, meters(n.distance_m)),
        ));
        pairs.push(("Segment", format!("#{} (t = {:.3})", n.segment_index, n.t)));
        pairs.push((
            "Closest",
            format!("{:.6}, {:.6}", n.closest.lat, n.closest.lng),
        ));
    }
    print_kv_block(&pairs, |k| c.key(k));
}
