use serde::{Deserialize, Serialize};

use super::aof::aof_unit_efficiency;
use super::efficiency::{Correction, EfficiencyRegime};
use super::productivity::{j_for, qb_for};
use super::well_test::{InflowError, WellTest};

/// 임의 pwf 에서 유량을 구하는 IPR 상관식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IprMethod {
    /// 선형 Darcy (J * 압력강하)
    Darcy,
    /// Vogel (AOF 기준 2차식)
    Vogel,
    /// Standing (효율 계수 반영)
    Standing,
    /// 기포점 위는 Darcy, 아래는 Vogel 로 잇는 복합 IPR
    Composite,
}

impl IprMethod {
    pub const ALL: [IprMethod; 4] = [
        IprMethod::Darcy,
        IprMethod::Vogel,
        IprMethod::Standing,
        IprMethod::Composite,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IprMethod::Darcy => "Darcy",
            IprMethod::Vogel => "Vogel",
            IprMethod::Standing => "Standing",
            IprMethod::Composite => "Composite IPR",
        }
    }

    /// 곡선에 기포점 표시를 붙이는 방법인지 여부.
    pub fn marks_bubble_point(&self) -> bool {
        !matches!(self, IprMethod::Darcy)
    }
}

/// Darcy 선형 유량. 효율 계수는 반영하지 않고 보정 없는 J 를 사용한다.
pub fn qo_darcy(well: &WellTest, pwf_psia: f64) -> f64 {
    j_for(well, Correction::None) * (well.pr_psia - pwf_psia)
}

/// Vogel 유량 `AOF * (1 - 0.2*(pwf/pr) - 0.8*(pwf/pr)^2)`. 효율 계수는 반영하지 않는다.
pub fn qo_vogel(well: &WellTest, pwf_psia: f64) -> f64 {
    let ratio = pwf_psia / well.pr_psia;
    aof_unit_efficiency(well) * (1.0 - 0.2 * ratio - 0.8 * ratio.powi(2))
}

/// 복합 IPR. 미포화 저류층의 기포점 아래 구간만 Vogel 형태로 이어 붙인다.
pub fn qo_composite(well: &WellTest, pwf_psia: f64) -> f64 {
    if !well.is_subsaturated() {
        return qo_vogel(well, pwf_psia);
    }
    if pwf_psia >= well.pb_psia {
        qo_darcy(well, pwf_psia)
    } else {
        below_bubble_point_vogel(well, pwf_psia)
    }
}

/// Standing 유량.
///
/// - 포화: `q * ef * (pr² - pwf²) / (pr² - pwf_test²)`
/// - 미포화, pwf ≥ pb: `q * ef_eff * (pr - pwf) / (pr - pwf_test)`, ef_eff = ef*ef2 (ef2 가 있을 때)
/// - 미포화, pwf < pb: 포화 구간 항과 미포화 구간 항의 합
pub fn qo_standing(well: &WellTest, pwf_psia: f64) -> f64 {
    let q = well.q_test_bpd;
    let ef = well.ef;
    let pr = well.pr_psia;
    let pb = well.pb_psia;
    let pwf_test = well.pwf_test_psia;

    if !well.is_subsaturated() {
        return q * ef * ((pr.powi(2) - pwf_psia.powi(2)) / (pr.powi(2) - pwf_test.powi(2)));
    }
    if pwf_psia >= pb {
        let ef_eff = match well.ef2 {
            Some(ef2) => ef * ef2,
            None => ef,
        };
        q * ef_eff * ((pr - pwf_psia) / (pr - pwf_test))
    } else {
        let q_saturated = q * ef * ((pr.powi(2) - pb.powi(2)) / (pr.powi(2) - pwf_test.powi(2)));
        let q_subsaturated = q * ef * ((pb - pwf_psia) / (pr - pwf_test));
        q_saturated + q_subsaturated
    }
}

/// 선택한 상관식으로 pwf 에서의 유량을 구한다.
///
/// 효율 계수를 쓰지 않는 상관식이어도 (ef, ef2) 조합은 먼저 검증한다.
pub fn rate_at_pressure(
    method: IprMethod,
    well: &WellTest,
    pwf_psia: f64,
) -> Result<f64, InflowError> {
    EfficiencyRegime::classify(well.ef, well.ef2)?;
    Ok(rate_for(method, well, pwf_psia))
}

pub(crate) fn rate_for(method: IprMethod, well: &WellTest, pwf_psia: f64) -> f64 {
    match method {
        IprMethod::Darcy => qo_darcy(well, pwf_psia),
        IprMethod::Vogel => qo_vogel(well, pwf_psia),
        IprMethod::Standing => qo_standing(well, pwf_psia),
        IprMethod::Composite => qo_composite(well, pwf_psia),
    }
}

/// 효율 계수 유무에 따라 상관식을 골라 pwf 에서의 유량을 구한다.
///
/// | 보정   | 미포화, pwf ≥ pb | 미포화, pwf < pb           | 포화     |
/// |--------|------------------|----------------------------|----------|
/// | 없음   | Darcy            | Qb + Vogel 항              | Vogel    |
/// | ef     | Darcy            | Qb(ef) + Standing 항       | Standing |
/// | ef,ef2 | Darcy            | Qb(ef,ef2) + Standing 항   | Standing |
pub fn qo(well: &WellTest, pwf_psia: f64) -> Result<f64, InflowError> {
    let correction = EfficiencyRegime::classify(well.ef, well.ef2)?.correction();
    if !well.is_subsaturated() {
        return Ok(match correction {
            Correction::None => qo_vogel(well, pwf_psia),
            Correction::Single | Correction::Dual => qo_standing(well, pwf_psia),
        });
    }
    if pwf_psia >= well.pb_psia {
        return Ok(qo_darcy(well, pwf_psia));
    }
    let rate = match correction {
        Correction::None => below_bubble_point_vogel(well, pwf_psia),
        Correction::Single | Correction::Dual => {
            let one_minus_x = 1.0 - pwf_psia / well.pb_psia;
            let standing = 1.8 * one_minus_x - 0.8 * well.ef * one_minus_x.powi(2);
            qb_for(well, correction)
                + ((j_for(well, correction) * well.pb_psia) / 1.8) * standing
        }
    };
    Ok(rate)
}

fn below_bubble_point_vogel(well: &WellTest, pwf_psia: f64) -> f64 {
    let x = pwf_psia / well.pb_psia;
    qb_for(well, Correction::None)
        + ((j_for(well, Correction::None) * well.pb_psia) / 1.8)
            * (1.0 - 0.2 * x - 0.8 * x.powi(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn subsaturated() -> WellTest {
        WellTest::new(500.0, 3000.0, 4000.0, 2500.0)
    }

    fn saturated() -> WellTest {
        WellTest::new(500.0, 1000.0, 2000.0, 2500.0)
    }

    #[test]
    fn darcy_is_linear_in_drawdown() {
        let well = subsaturated();
        assert_eq!(qo_darcy(&well, 3000.0), 500.0);
        assert_eq!(qo_darcy(&well, 0.0), 2000.0);
    }

    #[test]
    fn darcy_and_vogel_ignore_efficiency() {
        let base = subsaturated();
        let damaged = base.with_efficiency(0.6, None);
        assert_eq!(qo_darcy(&base, 1200.0), qo_darcy(&damaged, 1200.0));
        assert_eq!(qo_vogel(&base, 1200.0), qo_vogel(&damaged, 1200.0));
    }

    #[test]
    fn vogel_reaches_aof_at_zero_pwf() {
        let well = saturated();
        assert_relative_eq!(qo_vogel(&well, 0.0), 500.0 / 0.7, max_relative = 1e-12);
        assert_relative_eq!(qo_vogel(&well, 1000.0), 500.0, max_relative = 1e-12);
    }

    #[test]
    fn composite_is_continuous_at_bubble_point() {
        let well = subsaturated();
        let at_pb = qo_composite(&well, 2500.0);
        let just_below = qo_composite(&well, 2500.0 - 1e-7);
        let qb = qb_for(&well, Correction::None);
        assert_relative_eq!(at_pb, qb, max_relative = 1e-12);
        assert_relative_eq!(just_below, at_pb, max_relative = 1e-9);
    }

    #[test]
    fn composite_uses_vogel_for_saturated_reservoir() {
        let well = saturated();
        assert_eq!(qo_composite(&well, 800.0), qo_vogel(&well, 800.0));
    }

    #[test]
    fn standing_saturated_at_unit_efficiency() {
        let well = saturated();
        let expected = 500.0 * ((2000.0f64.powi(2) - 600.0f64.powi(2)) / (2000.0f64.powi(2) - 1000.0f64.powi(2)));
        assert_eq!(qo_standing(&well, 600.0), expected);
    }

    #[test]
    fn standing_subsaturated_uses_combined_efficiency_above_pb() {
        let well = subsaturated().with_efficiency(0.8, Some(1.5));
        assert_relative_eq!(qo_standing(&well, 3500.0), 500.0 * 1.2 * 0.5, max_relative = 1e-12);
    }

    #[test]
    fn standing_subsaturated_below_pb_sums_both_zones() {
        let well = subsaturated().with_efficiency(0.8, None);
        let q_sat = 500.0 * 0.8 * ((16.0e6 - 6.25e6) / (16.0e6 - 9.0e6));
        let q_sub = 500.0 * 0.8 * (500.0 / 1000.0);
        assert_relative_eq!(qo_standing(&well, 2000.0), q_sat + q_sub, max_relative = 1e-12);
    }

    #[test]
    fn qo_without_correction_matches_composite() {
        let well = WellTest::new(500.0, 2000.0, 4000.0, 2500.0);
        for pwf in [0.0, 1000.0, 2400.0, 2500.0, 3200.0] {
            assert_eq!(qo(&well, pwf).unwrap(), qo_composite(&well, pwf));
        }
    }

    #[test]
    fn qo_saturated_with_efficiency_delegates_to_standing() {
        let single = saturated().with_efficiency(0.7, None);
        let dual = saturated().with_efficiency(0.7, Some(1.3));
        for pwf in [0.0, 500.0, 1500.0] {
            assert_eq!(qo(&single, pwf).unwrap(), qo_standing(&single, pwf));
            assert_eq!(qo(&dual, pwf).unwrap(), qo_standing(&dual, pwf));
            assert_eq!(
                qo(&dual, pwf).unwrap(),
                rate_at_pressure(IprMethod::Standing, &dual, pwf).unwrap()
            );
        }
    }

    #[test]
    fn qo_dual_below_pb_keeps_first_efficiency_in_polynomial() {
        // Qb, J 는 (ef, ef2) 로 보정하지만 다항식 계수는 ef 만 쓴다.
        let well = WellTest::new(500.0, 2000.0, 4000.0, 2500.0).with_efficiency(0.7, Some(1.3));
        let standing_j = 500.0 / (1500.0 + (2500.0 / 1.8) * (1.8 * 0.2 - 0.8 * 0.7 * 0.04));
        let j = standing_j / 0.7 * 1.3;
        let one_minus_x = 1.0 - 1200.0 / 2500.0;
        let standing = 1.8 * one_minus_x - 0.8 * 0.7 * one_minus_x * one_minus_x;
        let expected = j * 1500.0 + j * 2500.0 / 1.8 * standing;
        let rate = qo(&well, 1200.0).unwrap();
        assert_relative_eq!(rate, expected, max_relative = 1e-12);
        assert_relative_eq!(rate, 1221.3544018058694, max_relative = 1e-12);
    }

    #[test]
    fn qo_rejects_ef2_without_ef() {
        let well = subsaturated().with_efficiency(1.0, Some(1.1));
        assert!(matches!(qo(&well, 1000.0), Err(InflowError::InvalidCombination { .. })));
        assert!(rate_at_pressure(IprMethod::Darcy, &well, 1000.0).is_err());
    }

    #[test]
    fn only_darcy_skips_bubble_point_marker() {
        for method in IprMethod::ALL {
            assert_eq!(method.marks_bubble_point(), method != IprMethod::Darcy);
        }
    }
}
