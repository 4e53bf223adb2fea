use crate::hydraulics::hydraulicserror::HydraulicsError;

/// A discharging accumulator tank.
///
/// While discharging it contributes `volume / discharge_time` of extra
/// flow, modeled downstream as a horizontal shift of the pump curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator {
    volume: f64,
    discharge_time: f64,
}

impl Accumulator {
    pub fn new(volume: f64, discharge_time: f64) -> Result<Accumulator, HydraulicsError> {
        if discharge_time <= 0.0 {
            return Err(HydraulicsError::NonPositiveDischargeTime(discharge_time));
        }
        if volume < 0.0 {
            return Err(HydraulicsError::NegativeVolume(volume));
        }
        Ok(Accumulator { volume, discharge_time })
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn discharge_time(&self) -> f64 {
        self.discharge_time
    }

    pub fn flow_shift(&self) -> f64 {
        self.volume / self.discharge_time
    }
}
