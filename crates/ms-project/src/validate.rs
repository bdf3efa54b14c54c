//! Input card validation.

use crate::schema::{InputCard, REQUIRED_SECTIONS, StructureKind};
use ms_controls::PidConfig;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Input card missing sections: {}", .0.join(", "))]
    MissingSections(Vec<String>),

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

/// Names from [`REQUIRED_SECTIONS`] absent from `present`, in card order.
pub fn missing_sections<'a>(present: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let present: Vec<&str> = present.into_iter().collect();
    REQUIRED_SECTIONS
        .iter()
        .filter(|name| !present.contains(name))
        .map(|name| name.to_string())
        .collect()
}

fn validate_pid(field: &str, pid: &PidConfig) -> Result<(), ValidationError> {
    positive(&format!("{field}.Ti"), pid.ti)?;
    if pid.td < 0.0 {
        return Err(invalid(&format!("{field}.Td"), pid.td, "must be non-negative"));
    }
    if let Some((min, max)) = pid.limits {
        if !(min < max) {
            return Err(invalid(
                &format!("{field}.limits"),
                format!("[{min}, {max}]"),
                "min must be less than max",
            ));
        }
    }
    Ok(())
}

pub fn validate_card(card: &InputCard) -> Result<(), ValidationError> {
    positive("meta.t_end", card.meta.t_end)?;

    let hyd = &card.hydraulics;
    positive("hydraulics.dt", hyd.dt)?;
    positive("hydraulics.dr", hyd.dr)?;
    positive("hydraulics.A", hyd.params.area)?;
    positive("hydraulics.rho_salt", hyd.rho_salt)?;
    if hyd.n < 3 {
        return Err(invalid("hydraulics.N", hyd.n, "at least three cells are required"));
    }
    if card.steps() == 0 {
        return Err(invalid("meta.t_end", card.meta.t_end, "shorter than one time step"));
    }

    card.neutronics
        .validate()
        .map_err(|e| invalid("neutronics", "", &e.to_string()))?;

    let t1 = &card.thermal_1d;
    positive("thermal_1d.k", t1.k)?;
    positive("thermal_1d.rho", t1.rho)?;
    positive("thermal_1d.cp", t1.cp)?;

    let t2 = &card.thermal_2d;
    if t2.nr < 2 || t2.nz < 2 {
        return Err(invalid(
            "thermal_2d",
            format!("{}x{}", t2.nz, t2.nr),
            "at least two nodes per axis are required",
        ));
    }
    positive("thermal_2d.dr", t2.dr)?;
    positive("thermal_2d.dz", t2.dz)?;
    positive("thermal_2d.k", t2.k)?;
    positive("thermal_2d.rho", t2.rho)?;
    positive("thermal_2d.cp", t2.cp)?;
    if card.meta.structure == StructureKind::TwoD && hyd.n != t2.nz {
        return Err(invalid(
            "hydraulics.N",
            hyd.n,
            &format!("must equal thermal_2d.nz ({}) for a two_d structure", t2.nz),
        ));
    }

    let sup = &card.control.supervisor;
    validate_pid("control.pid_temp", &sup.pid_temp)?;
    validate_pid("control.pid_rho", &sup.pid_rho)?;
    if sup.mpc.horizon == 0 {
        return Err(invalid("control.mpc.horizon", 0, "must be at least one step"));
    }
    positive("control.anomaly_threshold", sup.anomaly_threshold)?;

    if let Some(decay) = &card.decay_heat {
        decay
            .validate()
            .map_err(|e| invalid("decay_heat", "", &e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_every_missing_section() {
        let missing = missing_sections(["meta", "hydraulics", "recorder"]);
        assert_eq!(
            missing,
            vec!["neutronics", "thermal_1d", "thermal_2d", "control"]
        );
        let err = ValidationError::MissingSections(missing);
        assert_eq!(
            err.to_string(),
            "Input card missing sections: neutronics, thermal_1d, thermal_2d, control"
        );
    }

    #[test]
    fn all_present_means_nothing_missing() {
        assert!(missing_sections(REQUIRED_SECTIONS).is_empty());
    }
}
