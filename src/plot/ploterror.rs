use thiserror::Error;

use crate::hydraulics::hydraulicserror::HydraulicsError;
use crate::math::curve::sampledcurve::CurveError;
use crate::math::intersection::intersectionfinder::IntersectionError;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("chart backend error: {0}")]
    Backend(String),
    #[error("nothing to draw: {0}")]
    EmptyChart(String),
    #[error(transparent)]
    Curve(#[from] CurveError),
    #[error(transparent)]
    Hydraulics(#[from] HydraulicsError),
    #[error(transparent)]
    Intersection(#[from] IntersectionError),
}
