use super::efficiency::{Correction, EfficiencyRegime};
use super::productivity::{j_for, qb_for};
use super::well_test::{InflowError, WellTest};

/// 절대 개방 유량(AOF, pwf = 0 에서의 유량) [bpd].
///
/// 미포화 저류층은 `J*pr`(시험점이 기포점 이상) 또는 `Qb + J*pb/1.8 * F` 로,
/// 포화 저류층은 시험점에서 Vogel/Standing 식을 역산해 구한다.
/// F 는 효율 영역별 보정항이다.
///
/// 같은 방향으로 두 번 보정된 조합(`Stacked`)은 상관식이 없으므로 오류를 반환한다.
pub fn absolute_open_flow(well: &WellTest) -> Result<f64, InflowError> {
    let regime = EfficiencyRegime::classify(well.ef, well.ef2)?;
    aof_for(well, regime)
}

pub(crate) fn aof_for(well: &WellTest, regime: EfficiencyRegime) -> Result<f64, InflowError> {
    let ef = well.ef;
    let ef2 = well.ef2.unwrap_or(1.0);
    // (미포화 보정항, 포화 보정항)
    let (sub_factor, sat_factor) = match regime {
        EfficiencyRegime::None => return Ok(aof_unit_efficiency(well)),
        EfficiencyRegime::Damaged => (1.8 - 0.8 * ef, 1.8 * ef - 0.8 * ef.powi(2)),
        EfficiencyRegime::Stimulated => (0.624 + 0.376 * ef, 0.624 + 0.376 * ef),
        EfficiencyRegime::DamagedThenStimulated => (0.624 + 0.376 * ef2, 0.624 + 0.376 * ef2),
        // 포화 쪽만 ef2 제곱을 쓰는 비대칭은 원 상관식 그대로다.
        EfficiencyRegime::StimulatedThenDamaged => (1.8 - 0.8 * ef2, 1.8 - 0.8 * ef2.powi(2)),
        EfficiencyRegime::Stacked => {
            return Err(InflowError::NoAofCorrelation { ef, ef2 });
        }
    };

    let correction = regime.correction();
    let aof = if well.is_subsaturated() {
        let j = j_for(well, correction);
        if well.test_above_bubble_point() {
            j * well.pr_psia
        } else {
            qb_for(well, correction) + ((j * well.pb_psia) / 1.8) * sub_factor
        }
    } else {
        let one_minus_y = 1.0 - well.pwf_test_psia / well.pr_psia;
        let standing =
            1.8 * ef * one_minus_y - 0.8 * ef.powi(2) * one_minus_y.powi(2);
        (well.q_test_bpd / standing) * sat_factor
    };
    Ok(aof)
}

pub(crate) fn aof_unit_efficiency(well: &WellTest) -> f64 {
    if well.is_subsaturated() {
        let j = j_for(well, Correction::None);
        if well.test_above_bubble_point() {
            j * well.pr_psia
        } else {
            qb_for(well, Correction::None) + (j * well.pb_psia) / 1.8
        }
    } else {
        let y = well.pwf_test_psia / well.pr_psia;
        well.q_test_bpd / (1.0 - 0.2 * y - 0.8 * y.powi(2))
    }
}
