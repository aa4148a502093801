//! 다상(oil + 용존가스) 유입 성능 계산 모듈 모음.
//! 생산성 지수, 기포점 유량, AOF, pwf 별 유량, IPR 곡선으로 구성한다.

pub mod aof;
pub mod curve;
pub mod efficiency;
pub mod productivity;
pub mod rate;

pub use aof::absolute_open_flow;
pub use curve::{ipr_curve, CurvePoint, IprCurve, DEFAULT_CURVE_RESOLUTION};
pub use efficiency::{Correction, EfficiencyRegime};
pub use productivity::{bubble_point_rate, productivity_index};
pub use rate::{qo, qo_composite, qo_darcy, qo_standing, qo_vogel, rate_at_pressure, IprMethod};
pub use well_test::{InflowError, WellTest};
