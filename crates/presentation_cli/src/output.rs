//! Plain-text rendering of results

use std::fmt::Write as _;

use domain::{CostResult, GeocodeCandidate, RouteResult};

/// Cost figures as an aligned table
pub fn format_cost(result: &CostResult, currency: &str) -> String {
    let b = &result.breakdown;
    let rows = [
        ("Fuel", b.fuel),
        ("Route", b.route),
        ("Lodging", b.lodging),
        ("Food", b.food),
        ("Other", b.other),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "Fuel needed:     {:>10.2} l", result.liters);
    for (label, amount) in rows {
        let _ = writeln!(out, "{:<16} {amount:>10.2} {currency}", format!("{label}:"));
    }
    let _ = writeln!(out, "Extras:          {:>10.2} {currency}", result.extras_cost);
    let _ = writeln!(out, "Total:           {:>10.2} {currency}", result.total_cost);
    let _ = write!(out, "Per person:      {:>10.2} {currency}", result.cost_per_person);
    out
}

/// Numbered candidate list, latitude first
pub fn format_candidates(candidates: &[GeocodeCandidate]) -> String {
    if candidates.is_empty() {
        return "No matches".to_string();
    }

    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| match c.point() {
            Some(p) => format!("{:>2}. {} ({:.5}, {:.5})", i + 1, c.display_name, p.lat(), p.lng()),
            None => format!("{:>2}. {} (no position)", i + 1, c.display_name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line route summary
pub fn format_route(route: &RouteResult) -> String {
    format!(
        "Distance: {:.2} km, duration: {:.1} min, {} path points",
        route.distance_km,
        route.duration_min,
        route.geometry.len()
    )
}
