use super::efficiency::{Correction, EfficiencyRegime};
use super::well_test::{InflowError, WellTest};

/// 시험점에서 역산한 생산성 지수 J [stb/d/psi].
///
/// - 시험점이 기포점 이상이면 선형 Darcy 식 `J = q / (pr - pwf)` 를 사용한다.
/// - 기포점 미만이면 Vogel(보정 없음) 또는 Standing(ef 보정) 다항식을 사용한다.
/// - ef2 가 있으면 ef 기준 J 를 ef 로 나누고 ef2 를 곱한다.
pub fn productivity_index(well: &WellTest) -> Result<f64, InflowError> {
    let regime = EfficiencyRegime::classify(well.ef, well.ef2)?;
    Ok(j_for(well, regime.correction()))
}

/// 기포점 압력에서의 유량 `Qb = J * (pr - pb)` [bpd].
pub fn bubble_point_rate(well: &WellTest) -> Result<f64, InflowError> {
    let regime = EfficiencyRegime::classify(well.ef, well.ef2)?;
    Ok(qb_for(well, regime.correction()))
}

pub(crate) fn j_for(well: &WellTest, correction: Correction) -> f64 {
    match correction {
        Correction::None => {
            if well.test_above_bubble_point() {
                darcy_j(well)
            } else {
                let x = well.pwf_test_psia / well.pb_psia;
                let vogel = 1.0 - 0.2 * x - 0.8 * x.powi(2);
                well.q_test_bpd
                    / ((well.pr_psia - well.pb_psia) + (well.pb_psia / 1.8) * vogel)
            }
        }
        Correction::Single => standing_j(well),
        Correction::Dual => {
            let j = standing_j(well);
            well.ef2.map_or(j, |ef2| j / well.ef * ef2)
        }
    }
}

pub(crate) fn qb_for(well: &WellTest, correction: Correction) -> f64 {
    j_for(well, correction) * (well.pr_psia - well.pb_psia)
}

fn darcy_j(well: &WellTest) -> f64 {
    well.q_test_bpd / (well.pr_psia - well.pwf_test_psia)
}

/// Standing 효율 보정 다항식을 사용한 J (ef 만 반영).
fn standing_j(well: &WellTest) -> f64 {
    if well.test_above_bubble_point() {
        return darcy_j(well);
    }
    let one_minus_x = 1.0 - well.pwf_test_psia / well.pb_psia;
    let standing = 1.8 * one_minus_x - 0.8 * well.ef * one_minus_x.powi(2);
    well.q_test_bpd / ((well.pr_psia - well.pb_psia) + (well.pb_psia / 1.8) * standing)
}
