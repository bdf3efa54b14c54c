// ms-core/src/units.rs

use uom::si::f64::{Power as UomPower, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Power = UomPower;
pub type Time = UomTime;

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}
