//! Content-based hashing for run IDs.

use ms_project::InputCard;
use sha2::{Digest, Sha256};

/// SHA-256 over the card's JSON form and the solver version, as lowercase hex.
pub fn compute_run_id(card: &InputCard, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let card_json = serde_json::to_string(card).unwrap_or_default();
    hasher.update(card_json.as_bytes());
    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_project::parse_json;

    const CARD: &str = r#"{
        "meta": { "t_end": 1.0 },
        "neutronics": { "beta_i": [0.0065], "lambda_i": [0.08], "Lambda": 1e-4, "T_c": 2.0, "tau": 1.0 },
        "thermal_1d": {}, "thermal_2d": {}, "hydraulics": {}, "control": {}, "recorder": {}
    }"#;

    #[test]
    fn hash_stability() {
        let card = parse_json(CARD).unwrap();
        let id = compute_run_id(&card, "v1");
        assert_eq!(id, compute_run_id(&card, "v1"));
        assert_eq!(id.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let card = parse_json(CARD).unwrap();
        let mut other = card.clone();
        other.meta.t_end = 2.0;
        assert_ne!(compute_run_id(&card, "v1"), compute_run_id(&other, "v1"));
        assert_ne!(compute_run_id(&card, "v1"), compute_run_id(&card, "v2"));
    }
}
