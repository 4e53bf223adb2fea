use thiserror::Error;

use crate::hydraulics::hydraulicserror::HydraulicsError;
use crate::math::curve::sampledcurve::CurveError;
use crate::math::intersection::intersectionfinder::IntersectionError;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error(transparent)]
    Hydraulics(#[from] HydraulicsError),
    #[error(transparent)]
    Curve(#[from] CurveError),
    #[error(transparent)]
    Intersection(#[from] IntersectionError),
    #[error("cannot write sweep report: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot serialize sweep report: {0}")]
    Json(#[from] serde_json::Error),
}
