use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::efficiency::{Correction, EfficiencyRegime};
use super::productivity::qb_for;
use super::rate::{rate_for, IprMethod};
use super::well_test::{InflowError, WellTest};
use crate::interpolation::{linspace, MonotoneCubic};

/// 곡선 재표본 기본 해상도.
pub const DEFAULT_CURVE_RESOLUTION: usize = 500;

/// IPR 곡선 위의 한 점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub rate_bpd: f64,
    pub pwf_psia: f64,
}

/// IPR 곡선 계산 결과. 그리기는 호출자 몫이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IprCurve {
    pub method: IprMethod,
    /// 요청한 pwf 마다 하나씩, 유량 오름차순
    pub points: Vec<CurvePoint>,
    /// 유량 구간 [최소, 최대] 를 등간격으로 재표본한 곡선
    pub smoothed: Vec<CurvePoint>,
    /// 기포점 표시 (Qb, pb). Darcy 에는 없다.
    pub bubble_point: Option<CurvePoint>,
}

/// pwf 목록에 대해 선택한 상관식을 평가하고 매끄러운 IPR 곡선을 만든다.
///
/// - 빈 목록은 [`InflowError::NoData`]
/// - 정렬 후 같은 유량이 두 번 나오면 [`InflowError::DuplicateRate`]
/// - 유한하지 않은 유량은 [`InflowError::NonFiniteRate`]
///
/// 점이 하나뿐이면 재표본 곡선은 그 점을 `resolution` 번 반복한다.
pub fn ipr_curve(
    well: &WellTest,
    pwf_list: &[f64],
    method: IprMethod,
    resolution: usize,
) -> Result<IprCurve, InflowError> {
    EfficiencyRegime::classify(well.ef, well.ef2)?;
    if pwf_list.is_empty() {
        warn!(?method, "IPR curve requested without pressure samples");
        return Err(InflowError::NoData);
    }
    if resolution < 2 {
        return Err(InflowError::InvalidResolution(resolution));
    }

    let mut points = Vec::with_capacity(pwf_list.len());
    for &pwf_psia in pwf_list {
        let rate_bpd = rate_for(method, well, pwf_psia);
        if !rate_bpd.is_finite() {
            return Err(InflowError::NonFiniteRate { pwf_psia, rate_bpd });
        }
        points.push(CurvePoint { rate_bpd, pwf_psia });
    }
    points.sort_by(|a, b| a.rate_bpd.total_cmp(&b.rate_bpd));
    if let Some(dup) = points.windows(2).find(|w| w[0].rate_bpd == w[1].rate_bpd) {
        return Err(InflowError::DuplicateRate {
            rate_bpd: dup[0].rate_bpd,
        });
    }

    let smoothed = smooth(&points, resolution)?;
    // 기포점 표시는 보정 없는 Qb 를 사용한다.
    let bubble_point = method.marks_bubble_point().then(|| CurvePoint {
        rate_bpd: qb_for(well, Correction::None),
        pwf_psia: well.pb_psia,
    });
    debug!(
        ?method,
        samples = points.len(),
        resolution,
        has_marker = bubble_point.is_some(),
        "IPR curve generated"
    );

    Ok(IprCurve {
        method,
        points,
        smoothed,
        bubble_point,
    })
}

fn smooth(points: &[CurvePoint], resolution: usize) -> Result<Vec<CurvePoint>, InflowError> {
    if let [only] = points {
        return Ok(vec![*only; resolution]);
    }
    let spline = MonotoneCubic::new(
        points.iter().map(|p| p.rate_bpd).collect(),
        points.iter().map(|p| p.pwf_psia).collect(),
    )?;
    Ok(linspace(spline.x_min(), spline.x_max(), resolution)
        .into_iter()
        .map(|rate_bpd| CurvePoint {
            rate_bpd,
            pwf_psia: spline.eval(rate_bpd),
        })
        .collect())
}
