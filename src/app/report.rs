use dianti::RunOutcome;
use dianti::api::Building;
use strum::IntoEnumIterator;

/// Final lines printed when a run ends.
pub fn render_outcome(outcome: &RunOutcome) -> String {
    let mut lines = vec![
        format!(
            "Score: {}",
            outcome
                .score
                .map_or_else(|| "not available".to_string(), |s| s.to_string())
        ),
        format!(
            "Replay URL: {}",
            outcome.replay_url.as_deref().unwrap_or("not available")
        ),
    ];
    for error in &outcome.final_errors {
        lines.push(format!("Error: {error}"));
    }
    lines.join("\n")
}

pub fn render_buildings() -> String {
    let mut lines = vec![format!(
        "{:<15} {:>6} {:>9} {:>8} {:>6}  {}",
        "building", "floors", "elevators", "requests", "turns", "clustered"
    )];
    for building in Building::iter() {
        let p = building.profile();
        lines.push(format!(
            "{:<15} {:>6} {:>9} {:>8} {:>6}  {}",
            building.as_ref(),
            p.floors,
            p.elevators,
            p.requests,
            p.turns,
            if p.clustered { "yes" } else { "no" }
        ));
    }
    lines.join("\n")
}
